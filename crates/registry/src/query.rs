//! Filter-expression builder for the registry query grammar.
//!
//! The search API filters products with a small boolean grammar of
//! parenthesized `eq`/`like` comparisons joined by `and`/`or`, with
//! double-quoted operands:
//!
//! ```text
//! ((product_class eq "Product_Context" and lid like "urn:nasa:pds:context:target:*")
//!   and ((title like "moon") or (description like "moon")))
//! ```
//!
//! Expressions are built as a tagged tree and serialized in one place, so
//! quoting and escaping stay consistent regardless of how clauses are
//! composed.

use std::fmt;
use std::fmt::Display;

/// A filter expression node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// `(field eq "value")`
    Eq(String, String),
    /// `(field like "value")`
    Like(String, String),
    /// Conjunction of sub-expressions.
    And(Vec<Expr>),
    /// Disjunction of sub-expressions.
    Or(Vec<Expr>),
}

impl Expr {
    /// `(field eq "value")`
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Expr::Eq(field.into(), value.into())
    }

    /// `(field like "value")`
    pub fn like(field: impl Into<String>, value: impl Into<String>) -> Self {
        Expr::Like(field.into(), value.into())
    }

    /// Conjoin `self` with `other`.
    pub fn and(self, other: Expr) -> Self {
        match self {
            Expr::And(mut children) => {
                children.push(other);
                Expr::And(children)
            }
            expr => Expr::And(vec![expr, other]),
        }
    }

    /// Disjoin `self` with `other`.
    pub fn or(self, other: Expr) -> Self {
        match self {
            Expr::Or(mut children) => {
                children.push(other);
                Expr::Or(children)
            }
            expr => Expr::Or(vec![expr, other]),
        }
    }

    /// A keyword clause matching `term` against title or description:
    /// `((title like "term") or (description like "term"))`.
    ///
    /// Multiple keywords are joined into one space-separated term, matching
    /// the upstream client's behavior of searching the phrase as a whole.
    pub fn keywords(keywords: &[String]) -> Option<Self> {
        if keywords.is_empty() {
            return None;
        }
        let term = keywords.join(" ");
        Some(Expr::like("title", term.clone()).or(Expr::like("description", term)))
    }

    /// Serialize to the registry query grammar.
    pub fn to_query_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Eq(field, value) => write!(f, "({field} eq \"{}\")", escape_operand(value)),
            Expr::Like(field, value) => write!(f, "({field} like \"{}\")", escape_operand(value)),
            Expr::And(children) => write_joined(f, children, " and "),
            Expr::Or(children) => write_joined(f, children, " or "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, children: &[Expr], separator: &str) -> fmt::Result {
    match children {
        [] => Ok(()),
        [only] => only.fmt(f),
        [first, rest @ ..] => {
            write!(f, "({first}")?;
            for child in rest {
                write!(f, "{separator}{child}")?;
            }
            write!(f, ")")
        }
    }
}

/// Escape an operand for embedding between double quotes.
///
/// The upstream client interpolated operands verbatim, which let an embedded
/// `"` terminate the literal early. Escaping here closes that gap.
fn escape_operand(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_nodes_serialize_with_quoted_operands() {
        assert_eq!(
            Expr::eq("product_class", "Product_Context").to_query_string(),
            "(product_class eq \"Product_Context\")"
        );
        assert_eq!(
            Expr::like("lid", "urn:nasa:pds:context:target:*").to_query_string(),
            "(lid like \"urn:nasa:pds:context:target:*\")"
        );
    }

    #[test]
    fn and_or_nesting() {
        let expr = Expr::eq("product_class", "Product_Context")
            .and(Expr::like("lid", "urn:nasa:pds:context:investigation:*"))
            .and(Expr::like("title", "cassini").or(Expr::like("description", "cassini")));
        assert_eq!(
            expr.to_query_string(),
            "((product_class eq \"Product_Context\") and (lid like \"urn:nasa:pds:context:investigation:*\") \
             and ((title like \"cassini\") or (description like \"cassini\")))"
        );
    }

    #[test]
    fn single_child_boolean_collapses() {
        let expr = Expr::And(vec![Expr::like("title", "moon")]);
        assert_eq!(expr.to_query_string(), "(title like \"moon\")");
    }

    #[test]
    fn embedded_quotes_are_escaped() {
        let expr = Expr::like("title", "12\" record");
        assert_eq!(expr.to_query_string(), "(title like \"12\\\" record\")");
    }

    #[test]
    fn keyword_clause_joins_terms() {
        let expr = Expr::keywords(&["saturn".to_string(), "rings".to_string()]).unwrap();
        assert_eq!(
            expr.to_query_string(),
            "((title like \"saturn rings\") or (description like \"saturn rings\"))"
        );
    }

    #[test]
    fn empty_keyword_list_yields_no_clause() {
        assert_eq!(Expr::keywords(&[]), None);
    }
}
