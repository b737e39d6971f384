//! Quoting helpers for the SQL Waymark generates itself (ledger statements).
//!
//! Migration scripts are never rewritten; these helpers only protect the
//! identifiers and literals that the engine interpolates.

/// Quote a SQL identifier, doubling embedded double quotes.
///
/// # Examples
/// ```
/// use wm_core::sql_utils::quote_ident;
/// assert_eq!(quote_ident("schema_migrations"), r#""schema_migrations""#);
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a potentially schema-qualified name, component by component.
///
/// # Examples
/// ```
/// use wm_core::sql_utils::quote_qualified;
/// assert_eq!(quote_qualified("ops.schema_migrations"), r#""ops"."schema_migrations""#);
/// ```
pub fn quote_qualified(name: &str) -> String {
    name.split('.')
        .map(quote_ident)
        .collect::<Vec<_>>()
        .join(".")
}

/// Split `schema.table` on the last `.`; unqualified names land in `main`.
pub fn split_qualified_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(pos) => (&name[..pos], &name[pos + 1..]),
        None => ("main", name),
    }
}
