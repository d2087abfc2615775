//! SQL identifier and literal utilities
//!
//! Generated SQL embeds user-entered column names, object names and
//! translation values. These helpers keep plain identifiers readable while
//! quoting anything that could break out of its position.

/// Words that Snowflake or DuckDB reject as bare column or object names.
///
/// Sorted, upper case.
const RESERVED_KEYWORDS: &[&str] = &[
    "ACCOUNT", "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "BETWEEN", "BY", "CASE", "CAST",
    "CHECK", "COLUMN", "CONNECT", "CONNECTION", "CONSTRAINT", "CREATE", "CROSS", "CURRENT",
    "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP", "CURRENT_USER", "DATABASE", "DEFAULT",
    "DELETE", "DESC", "DISTINCT", "DROP", "ELSE", "END", "EXCEPT", "EXISTS", "FALSE", "FETCH",
    "FOLLOWING", "FOR", "FOREIGN", "FROM", "FULL", "FUNCTION", "GRANT", "GROUP", "GSCRIPT",
    "HAVING", "ILIKE", "IN", "INCREMENT", "INNER", "INSERT", "INTERSECT", "INTO", "IS",
    "ISSUE", "JOIN", "LATERAL", "LEFT", "LIKE", "LIMIT", "LOCALTIME", "LOCALTIMESTAMP",
    "MINUS", "NATURAL", "NOT", "NULL", "OF", "OFFSET", "ON", "OR", "ORDER", "ORGANIZATION",
    "OUTER", "OVER", "PARTITION", "PRIMARY", "QUALIFY", "REFERENCES", "REGEXP", "RETURNING",
    "REVOKE", "RIGHT", "RLIKE", "ROW", "ROWS", "SAMPLE", "SCHEMA", "SELECT", "SET", "SOME",
    "START", "TABLE", "TABLESAMPLE", "THEN", "TO", "TRIGGER", "TRUE", "TRY_CAST", "UNION",
    "UNIQUE", "UPDATE", "USING", "VALUES", "VIEW", "WHEN", "WHENEVER", "WHERE", "WINDOW",
    "WITH",
];

/// Whether `ident` is a reserved keyword, ignoring case.
pub fn is_reserved_keyword(ident: &str) -> bool {
    RESERVED_KEYWORDS
        .binary_search(&ident.to_ascii_uppercase().as_str())
        .is_ok()
}

/// Quote a SQL identifier.
///
/// Wraps the identifier in double quotes and escapes any embedded double quotes
/// by doubling them, following the SQL standard.
///
/// # Examples
/// ```
/// use em_core::sql_utils::quote_ident;
/// assert_eq!(quote_ident("users"), r#""users""#);
/// assert_eq!(quote_ident(r#"my"table"#), r#""my""table""#);
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Whether an identifier can be emitted unquoted.
///
/// Plain identifiers start with a letter or underscore and contain only ASCII
/// letters, digits, `_` and `$`.
pub fn is_plain_ident(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Emit an identifier verbatim when plain and not reserved, quoted otherwise.
///
/// # Examples
/// ```
/// use em_core::sql_utils::render_ident;
/// assert_eq!(render_ident("CUSTOMER_ID"), "CUSTOMER_ID");
/// assert_eq!(render_ident("first name"), r#""first name""#);
/// assert_eq!(render_ident("ORDER"), r#""ORDER""#);
/// ```
pub fn render_ident(ident: &str) -> String {
    if is_plain_ident(ident) && !is_reserved_keyword(ident) {
        ident.to_string()
    } else {
        quote_ident(ident)
    }
}

/// Render a `db.schema.object` reference, quoting only the parts that need it.
pub fn render_qualified(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| render_ident(p))
        .collect::<Vec<_>>()
        .join(".")
}

/// Escape a SQL string literal value by doubling single quotes.
///
/// This is for use inside single-quoted SQL string literals, not identifiers.
pub fn escape_sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

/// Render a single-quoted SQL string literal.
pub fn string_literal(value: &str) -> String {
    format!("'{}'", escape_sql_string(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident_with_embedded_quotes() {
        assert_eq!(quote_ident(r#"my"table"#), r#""my""table""#);
    }

    #[test]
    fn test_is_plain_ident() {
        assert!(is_plain_ident("ORDERS"));
        assert!(is_plain_ident("_tmp$1"));
        assert!(!is_plain_ident("1abc"));
        assert!(!is_plain_ident(""));
        assert!(!is_plain_ident("a b"));
        assert!(!is_plain_ident("x';DROP"));
    }

    #[test]
    fn test_reserved_keywords_are_sorted() {
        assert!(RESERVED_KEYWORDS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_reserved_keywords_are_quoted() {
        assert!(is_reserved_keyword("function"));
        assert!(is_reserved_keyword("Order"));
        assert!(!is_reserved_keyword("ORDERS"));
        assert_eq!(render_ident("FUNCTION"), r#""FUNCTION""#);
        assert_eq!(render_ident("select"), r#""select""#);
        assert_eq!(render_ident("TITLE"), "TITLE");
        assert_eq!(render_qualified(&["DW", "TABLE", "X"]), r#"DW."TABLE".X"#);
    }

    #[test]
    fn test_render_qualified_mixed() {
        assert_eq!(render_qualified(&["db", "schema", "table"]), "db.schema.table");
        assert_eq!(
            render_qualified(&["db", "my schema", "t"]),
            r#"db."my schema".t"#
        );
    }

    #[test]
    fn test_string_literal_escapes_apostrophes() {
        assert_eq!(string_literal("O'Brien"), "'O''Brien'");
        assert_eq!(string_literal(""), "''");
    }
}
