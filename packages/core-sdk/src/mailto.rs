/** \brief 分享邮件的固定主题。 */
pub const SHARE_SUBJECT: &str = "Meeting Notes Summary";

/**
 * \brief 构造交给本地邮件客户端的 `mailto:` 链接。
 * \param recipients 收件人列表，原样传递
 * \param body       摘要文本，百分号编码后放入 `body` 参数
 *
 * 编码保留 `A-Z a-z 0-9 - _ . ~`，其余字节（包括 `!*'()`）都会编码。
 */
pub fn share_link(recipients: &str, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        recipients,
        urlencoding::encode(SHARE_SUBJECT),
        urlencoding::encode(body)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_link() {
        assert_eq!(
            share_link("a@b.com", "X"),
            "mailto:a@b.com?subject=Meeting%20Notes%20Summary&body=X"
        );
    }

    #[test]
    fn test_body_is_percent_encoded() {
        let link = share_link("a@b.com, c@d.org", "- Q3 budget & hiring\n- Ship 50% by Friday?");
        assert!(link.starts_with("mailto:a@b.com, c@d.org?"));
        assert!(link.ends_with(
            "&body=-%20Q3%20budget%20%26%20hiring%0A-%20Ship%2050%25%20by%20Friday%3F"
        ));
    }

    #[test]
    fn test_reserved_punctuation_is_encoded() {
        let link = share_link("a@b.com", "Done! (mostly) *won't* slip");
        assert!(link.ends_with("&body=Done%21%20%28mostly%29%20%2Awon%27t%2A%20slip"));
    }
}
