const MYSQL_ESCAPE: char = '`';

/// 用反引号包裹标识符，内部的反引号写两次
pub fn escape_identifier(ident: &str) -> String {
    let escaped = ident.replace(MYSQL_ESCAPE, "``");
    format!("{MYSQL_ESCAPE}{escaped}{MYSQL_ESCAPE}")
}
