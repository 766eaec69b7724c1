use crate::token::{Literal, Token};

/// Demonstrative expression tree, just enough shape to exercise the printer.
/// Operators carry their source token so the printer can reuse the lexeme.
#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    Literal(Option<Literal>),
    Unary {
        operator: Token,
        right: Box<Expr>,
    },
    Binary {
        operator: Token,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Grouping(Box<Expr>),
}

pub fn format_lisp_like(expr: &Expr) -> String {
    match expr {
        Expr::Literal(Some(literal)) => {
            format!("{literal}")
        }
        Expr::Literal(None) => "nil".to_string(),
        Expr::Unary { operator, right } => {
            parenthesize(&operator.lexeme, &[right.as_ref()])
        }
        Expr::Binary {
            operator,
            left,
            right,
        } => parenthesize(&operator.lexeme, &[left.as_ref(), right.as_ref()]),
        Expr::Grouping(expr) => parenthesize("group", &[expr.as_ref()]),
    }
}

fn parenthesize(name: &str, exprs: &[&Expr]) -> String {
    let mut out = String::new();
    out.push('(');
    out.push_str(name);
    for expr in exprs {
        out.push(' ');
        out.push_str(&format_lisp_like(expr));
    }
    out.push(')');
    out
}

#[cfg(test)]
mod tests {
    use crate::ast::{format_lisp_like, Expr};
    use crate::token::{Literal, Token, TokenType};

    fn operator(r#type: TokenType, lexeme: &str) -> Token {
        Token {
            r#type,
            lexeme: lexeme.to_string(),
            literal: None,
            line: 1,
        }
    }

    fn get_test_expr() -> Expr {
        // -123 * (45.67)
        Expr::Binary {
            operator: operator(TokenType::Star, "*"),
            left: Box::new(Expr::Unary {
                operator: operator(TokenType::Minus, "-"),
                right: Box::new(Expr::Literal(Some(Literal::Number(123.0)))),
            }),
            right: Box::new(Expr::Grouping(Box::new(Expr::Literal(Some(
                Literal::Number(45.67),
            ))))),
        }
    }

    #[test]
    fn test_format_expression_lisp_like() {
        let expr = get_test_expr();
        assert_eq!(
            format_lisp_like(&expr),
            "(* (- 123) (group 45.67))".to_string()
        );
    }

    #[test]
    fn test_format_nil_literal() {
        assert_eq!(format_lisp_like(&Expr::Literal(None)), "nil".to_string());
    }

    #[test]
    fn test_format_string_literal() {
        let expr = Expr::Literal(Some(Literal::String("lox".to_string())));
        assert_eq!(format_lisp_like(&expr), "lox".to_string());
    }
}
