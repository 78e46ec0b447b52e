use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
}

/// Expression tree produced by the parser.
///
/// Formulas are data authored by policy administrators, so the tree is the
/// whole language: literals, variable references, the four arithmetic
/// operators, and grouping (which the parser resolves away). There is no
/// call syntax and no way to reach outside the bindings map.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Decimal),
    Variable(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    /// Collect every variable name referenced anywhere in the tree,
    /// in first-occurrence order, without duplicates.
    ///
    /// Used to check a formula against a policy's declared variables at
    /// save time, before any metrics exist to evaluate against.
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Variable(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
            Expr::Unary { operand, .. } => operand.collect_variables(out),
            Expr::Binary { left, right, .. } => {
                left.collect_variables(out);
                right.collect_variables(out);
            }
        }
    }
}
