//! Expression and statement shapes consumed by the checker.
//!
//! Parsing is the host's job; the host lowers its syntax tree into these
//! shapes. Every expression carries an `ExprId` unique within one checker
//! run, which keys the inferred-type side table on `CheckerState`.

use phz_solver::UnionType;

/// Identity of an expression within one checker run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(pub u32);

#[derive(Clone, Debug)]
pub struct Expr {
    pub id: ExprId,
    pub line: u32,
    pub kind: ExprKind,
}

#[derive(Clone, Debug)]
pub enum ExprKind {
    Literal(Literal),
    Array(Vec<ArrayItem>),
    /// A variable, named without the leading `$`.
    Variable(String),
    PropertyFetch {
        object: Box<Expr>,
        property: String,
    },
    ArrayDimFetch {
        base: Box<Expr>,
        dim: Option<Box<Expr>>,
    },
    ConstFetch(String),
    Closure(Closure),
    Call(CallExpr),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Null,
}

impl Literal {
    #[must_use]
    pub fn inferred_type(&self) -> UnionType {
        match self {
            Literal::Int(_) => UnionType::int(),
            Literal::Float(_) => UnionType::float(),
            Literal::String(_) => UnionType::string(),
            Literal::Bool(_) => UnionType::bool(),
            Literal::Null => UnionType::null(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ArrayItem {
    pub key: Option<Expr>,
    pub value: Expr,
}

#[derive(Clone, Debug)]
pub struct Closure {
    pub params: Vec<ClosureParam>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug)]
pub struct ClosureParam {
    pub name: String,
    pub declared_type: Option<UnionType>,
    pub by_ref: bool,
}

impl ClosureParam {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            by_ref: false,
        }
    }

    #[must_use]
    pub fn typed(name: impl Into<String>, declared_type: UnionType) -> Self {
        Self {
            declared_type: Some(declared_type),
            ..Self::new(name)
        }
    }
}

/// The four call shapes. Each carries exactly the fields it needs.
#[derive(Clone, Debug)]
pub enum CallExpr {
    Function(FunctionCall),
    New(NewExpr),
    Method(MethodCall),
    StaticMethod(StaticCall),
}

#[derive(Clone, Debug)]
pub struct FunctionCall {
    pub callee: Callee,
    pub args: Vec<Arg>,
}

#[derive(Clone, Debug)]
pub enum Callee {
    Name(String),
    Dynamic(Box<Expr>),
}

#[derive(Clone, Debug)]
pub struct NewExpr {
    pub class: ClassRef,
    pub args: Vec<Arg>,
}

#[derive(Clone, Debug)]
pub struct MethodCall {
    pub receiver: Box<Expr>,
    pub method: MemberName,
    pub args: Vec<Arg>,
}

#[derive(Clone, Debug)]
pub struct StaticCall {
    pub class: ClassRef,
    pub method: MemberName,
    pub args: Vec<Arg>,
}

/// A class named at a `new` or `::` site.
#[derive(Clone, Debug)]
pub enum ClassRef {
    Named(String),
    SelfRef,
    StaticRef,
    ParentRef,
    Dynamic(Box<Expr>),
}

impl ClassRef {
    /// Classify a written class name, recognizing `self`, `static` and `parent`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "self" => ClassRef::SelfRef,
            "static" => ClassRef::StaticRef,
            "parent" => ClassRef::ParentRef,
            _ => ClassRef::Named(name.to_string()),
        }
    }
}

#[derive(Clone, Debug)]
pub enum MemberName {
    Ident(String),
    Dynamic(Box<Expr>),
}

#[derive(Clone, Debug)]
pub struct Arg {
    pub value: Expr,
    /// `...$args`
    pub unpack: bool,
}

impl Arg {
    #[must_use]
    pub fn new(value: Expr) -> Self {
        Self {
            value,
            unpack: false,
        }
    }

    #[must_use]
    pub fn unpacked(value: Expr) -> Self {
        Self {
            value,
            unpack: true,
        }
    }
}

impl From<Expr> for Arg {
    fn from(value: Expr) -> Self {
        Arg::new(value)
    }
}

impl Expr {
    #[must_use]
    pub fn string_literal(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Literal(Literal::String(value)) => Some(value),
            _ => None,
        }
    }

    /// A variable or a property fetch: something a by-reference argument can bind.
    #[must_use]
    pub fn is_variable_like(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Variable(_) | ExprKind::PropertyFetch { .. }
        )
    }

    #[must_use]
    pub fn is_this(&self) -> bool {
        matches!(&self.kind, ExprKind::Variable(name) if name == "this")
    }

    /// The context key for variables and property chains: `$x`, `$this->foo`.
    #[must_use]
    pub fn var_id(&self) -> Option<String> {
        match &self.kind {
            ExprKind::Variable(name) => Some(format!("${name}")),
            ExprKind::PropertyFetch { object, property } => {
                object.var_id().map(|id| format!("{id}->{property}"))
            }
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub enum Stmt {
    Expr(Expr),
    Echo(Vec<Expr>),
    Return {
        value: Option<Expr>,
        line: u32,
    },
    If {
        cond: Expr,
        then_branch: Vec<Stmt>,
        else_ifs: Vec<ElseIf>,
        else_branch: Option<Vec<Stmt>>,
    },
    Try {
        body: Vec<Stmt>,
        catches: Vec<Catch>,
        finally: Option<Vec<Stmt>>,
    },
    For {
        init: Vec<Expr>,
        cond: Vec<Expr>,
        step: Vec<Expr>,
        body: Vec<Stmt>,
    },
    Foreach {
        subject: Expr,
        body: Vec<Stmt>,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    DoWhile {
        body: Vec<Stmt>,
        cond: Expr,
    },
    Switch {
        subject: Expr,
        cases: Vec<Case>,
    },
}

#[derive(Clone, Debug)]
pub struct ElseIf {
    pub cond: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug)]
pub struct Catch {
    pub types: Vec<String>,
    pub var: String,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug)]
pub struct Case {
    /// `None` for `default:`.
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
}

/// Allocates expressions with unique ids.
#[derive(Debug, Default)]
pub struct AstBuilder {
    next_id: u32,
    line: u32,
}

impl AstBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            line: 1,
        }
    }

    /// Set the line recorded on expressions built from now on.
    pub fn at_line(&mut self, line: u32) -> &mut Self {
        self.line = line;
        self
    }

    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn expr(&mut self, kind: ExprKind) -> Expr {
        let id = ExprId(self.next_id);
        self.next_id += 1;
        Expr {
            id,
            line: self.line,
            kind,
        }
    }

    pub fn int(&mut self, value: i64) -> Expr {
        self.expr(ExprKind::Literal(Literal::Int(value)))
    }

    pub fn float(&mut self, value: f64) -> Expr {
        self.expr(ExprKind::Literal(Literal::Float(value)))
    }

    pub fn string(&mut self, value: &str) -> Expr {
        self.expr(ExprKind::Literal(Literal::String(value.to_string())))
    }

    pub fn bool(&mut self, value: bool) -> Expr {
        self.expr(ExprKind::Literal(Literal::Bool(value)))
    }

    pub fn null(&mut self) -> Expr {
        self.expr(ExprKind::Literal(Literal::Null))
    }

    /// A list literal; keys are implicit.
    pub fn array(&mut self, values: Vec<Expr>) -> Expr {
        let items = values
            .into_iter()
            .map(|value| ArrayItem { key: None, value })
            .collect();
        self.expr(ExprKind::Array(items))
    }

    pub fn keyed_array(&mut self, entries: Vec<(Expr, Expr)>) -> Expr {
        let items = entries
            .into_iter()
            .map(|(key, value)| ArrayItem {
                key: Some(key),
                value,
            })
            .collect();
        self.expr(ExprKind::Array(items))
    }

    pub fn var(&mut self, name: &str) -> Expr {
        self.expr(ExprKind::Variable(name.trim_start_matches('$').to_string()))
    }

    pub fn this(&mut self) -> Expr {
        self.var("this")
    }

    pub fn prop(&mut self, object: Expr, property: &str) -> Expr {
        self.expr(ExprKind::PropertyFetch {
            object: Box::new(object),
            property: property.to_string(),
        })
    }

    pub fn dim(&mut self, base: Expr, dim: Option<Expr>) -> Expr {
        self.expr(ExprKind::ArrayDimFetch {
            base: Box::new(base),
            dim: dim.map(Box::new),
        })
    }

    pub fn constant(&mut self, name: &str) -> Expr {
        self.expr(ExprKind::ConstFetch(name.to_string()))
    }

    pub fn closure(&mut self, params: Vec<ClosureParam>, body: Vec<Stmt>) -> Expr {
        self.expr(ExprKind::Closure(Closure { params, body }))
    }

    /// `name(args...)`
    pub fn call(&mut self, name: &str, args: Vec<Expr>) -> Expr {
        self.call_with(
            Callee::Name(name.to_string()),
            args.into_iter().map(Arg::new).collect(),
        )
    }

    pub fn call_with(&mut self, callee: Callee, args: Vec<Arg>) -> Expr {
        self.expr(ExprKind::Call(CallExpr::Function(FunctionCall { callee, args })))
    }

    /// `new Class(args...)`
    pub fn new_object(&mut self, class: ClassRef, args: Vec<Expr>) -> Expr {
        self.expr(ExprKind::Call(CallExpr::New(NewExpr {
            class,
            args: args.into_iter().map(Arg::new).collect(),
        })))
    }

    /// `$receiver->method(args...)`
    pub fn method_call(&mut self, receiver: Expr, method: &str, args: Vec<Expr>) -> Expr {
        self.method_call_with(
            receiver,
            MemberName::Ident(method.to_string()),
            args.into_iter().map(Arg::new).collect(),
        )
    }

    pub fn method_call_with(&mut self, receiver: Expr, method: MemberName, args: Vec<Arg>) -> Expr {
        self.expr(ExprKind::Call(CallExpr::Method(MethodCall {
            receiver: Box::new(receiver),
            method,
            args,
        })))
    }

    /// `Class::method(args...)`
    pub fn static_call(&mut self, class: ClassRef, method: &str, args: Vec<Expr>) -> Expr {
        self.static_call_with(
            class,
            MemberName::Ident(method.to_string()),
            args.into_iter().map(Arg::new).collect(),
        )
    }

    pub fn static_call_with(&mut self, class: ClassRef, method: MemberName, args: Vec<Arg>) -> Expr {
        self.expr(ExprKind::Call(CallExpr::StaticMethod(StaticCall {
            class,
            method,
            args,
        })))
    }

    pub fn ret(&mut self, value: Option<Expr>) -> Stmt {
        Stmt::Return {
            value,
            line: self.line,
        }
    }
}

#[cfg(test)]
#[path = "../tests/ast_tests.rs"]
mod ast_tests;
