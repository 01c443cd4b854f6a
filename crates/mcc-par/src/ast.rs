//! AST node definitions for the parser.
//!
//! The parser builds a typed [`Node`] tree internally, then flattens it to
//! the generic positional shape (`{kind, value?, line?, column?, children?}`)
//! that downstream passes consume via [`Node::to_generic`].

/// A parsed program: the root is always a list of top-level declarations.
pub type Ast = Vec<Node>;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    FunctionDeclaration {
        ty: Box<Node>,
        name: Box<Node>,
        params: Box<Node>,
        body: Box<Node>,
        line: u32,
        column: u32,
    },
    Parameters(Vec<Node>),
    Parameter {
        ty: Box<Node>,
        name: Box<Node>,
    },
    VarDeclaration {
        ty: Box<Node>,
        name: Box<Node>,
        init: Option<Box<Node>>,
        line: u32,
        column: u32,
    },
    Block(Vec<Node>),
    IfStatement {
        cond: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Option<Box<Node>>,
        line: u32,
        column: u32,
    },
    WhileStatement {
        cond: Box<Node>,
        body: Box<Node>,
        line: u32,
        column: u32,
    },
    ForStatement {
        init: Box<Node>,
        cond: Box<Node>,
        step: Box<Node>,
        body: Box<Node>,
        line: u32,
        column: u32,
    },
    ReturnStatement {
        value: Option<Box<Node>>,
        line: u32,
        column: u32,
    },
    PrintStatement {
        value: Box<Node>,
        line: u32,
        column: u32,
    },
    ExpressionStatement(Box<Node>),
    Assignment {
        target: Box<Node>,
        value: Box<Node>,
        line: u32,
        column: u32,
    },
    Binary {
        op: String,
        left: Box<Node>,
        right: Box<Node>,
        line: u32,
        column: u32,
    },
    Unary {
        op: String,
        operand: Box<Node>,
        line: u32,
        column: u32,
    },
    FunctionCall {
        callee: Box<Node>,
        args: Vec<Node>,
        line: u32,
        column: u32,
    },
    Grouping(Box<Node>),
    Identifier {
        name: String,
        line: u32,
        column: u32,
    },
    NumberLiteral {
        value: String,
        line: u32,
        column: u32,
    },
    StringLiteral {
        value: String,
        line: u32,
        column: u32,
    },
    BoolLiteral {
        value: String,
        line: u32,
        column: u32,
    },
    Type {
        name: String,
        line: u32,
        column: u32,
    },
    /// Placeholder for an omitted clause (e.g. a missing `for` initializer).
    Empty,
}

/// The generic, positional AST shape that the rest of the pipeline relies on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenericNode {
    pub kind: String,
    pub value: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub children: Option<Vec<GenericNode>>,
}

impl GenericNode {
    fn leaf(kind: &str, value: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind: kind.to_string(),
            value: Some(value.into()),
            line: Some(line),
            column: Some(column),
            children: None,
        }
    }

    fn interior(kind: &str, line: Option<u32>, column: Option<u32>, children: Vec<GenericNode>) -> Self {
        Self {
            kind: kind.to_string(),
            value: None,
            line,
            column,
            children: Some(children),
        }
    }
}

impl Node {
    /// Flattens this node into the generic positional shape, per the
    /// per-`kind` child ordering fixed by the grammar.
    pub fn to_generic(&self) -> GenericNode {
        match self {
            Node::FunctionDeclaration { ty, name, params, body, line, column } => GenericNode::interior(
                "FunctionDeclaration",
                Some(*line),
                Some(*column),
                vec![ty.to_generic(), name.to_generic(), params.to_generic(), body.to_generic()],
            ),
            Node::Parameters(params) => {
                GenericNode::interior("Parameters", None, None, params.iter().map(Node::to_generic).collect())
            }
            Node::Parameter { ty, name } => {
                GenericNode::interior("Parameter", None, None, vec![ty.to_generic(), name.to_generic()])
            }
            Node::VarDeclaration { ty, name, init, line, column } => {
                let mut children = vec![ty.to_generic(), name.to_generic()];
                if let Some(init) = init {
                    children.push(init.to_generic());
                }
                GenericNode::interior("VarDeclaration", Some(*line), Some(*column), children)
            }
            Node::Block(stmts) => {
                GenericNode::interior("Block", None, None, stmts.iter().map(Node::to_generic).collect())
            }
            Node::IfStatement { cond, then_branch, else_branch, line, column } => {
                let mut children = vec![cond.to_generic(), then_branch.to_generic()];
                if let Some(else_branch) = else_branch {
                    children.push(else_branch.to_generic());
                }
                GenericNode::interior("IfStatement", Some(*line), Some(*column), children)
            }
            Node::WhileStatement { cond, body, line, column } => {
                GenericNode::interior("WhileStatement", Some(*line), Some(*column), vec![cond.to_generic(), body.to_generic()])
            }
            Node::ForStatement { init, cond, step, body, line, column } => GenericNode::interior(
                "ForStatement",
                Some(*line),
                Some(*column),
                vec![init.to_generic(), cond.to_generic(), step.to_generic(), body.to_generic()],
            ),
            Node::ReturnStatement { value, line, column } => {
                let children = value.iter().map(|v| v.to_generic()).collect();
                GenericNode::interior("ReturnStatement", Some(*line), Some(*column), children)
            }
            Node::PrintStatement { value, line, column } => {
                GenericNode::interior("PrintStatement", Some(*line), Some(*column), vec![value.to_generic()])
            }
            Node::ExpressionStatement(expr) => {
                GenericNode::interior("ExpressionStatement", None, None, vec![expr.to_generic()])
            }
            Node::Assignment { target, value, line, column } => {
                GenericNode::interior("Assignment", Some(*line), Some(*column), vec![target.to_generic(), value.to_generic()])
            }
            Node::Binary { op, left, right, line, column } => {
                let mut node = GenericNode::interior("Binary", Some(*line), Some(*column), vec![left.to_generic(), right.to_generic()]);
                node.value = Some(op.clone());
                node
            }
            Node::Unary { op, operand, line, column } => {
                let mut node = GenericNode::interior("Unary", Some(*line), Some(*column), vec![operand.to_generic()]);
                node.value = Some(op.clone());
                node
            }
            Node::FunctionCall { callee, args, line, column } => {
                let mut children = vec![callee.to_generic()];
                children.extend(args.iter().map(Node::to_generic));
                GenericNode::interior("FunctionCall", Some(*line), Some(*column), children)
            }
            Node::Grouping(inner) => GenericNode::interior("Grouping", None, None, vec![inner.to_generic()]),
            Node::Identifier { name, line, column } => GenericNode::leaf("Identifier", name, *line, *column),
            Node::NumberLiteral { value, line, column } => GenericNode::leaf("NumberLiteral", value, *line, *column),
            Node::StringLiteral { value, line, column } => GenericNode::leaf("StringLiteral", value, *line, *column),
            Node::BoolLiteral { value, line, column } => GenericNode::leaf("BoolLiteral", value, *line, *column),
            Node::Type { name, line, column } => GenericNode::leaf("Type", name, *line, *column),
            Node::Empty => GenericNode { kind: "Empty".to_string(), ..Default::default() },
        }
    }
}

/// Flattens a full program (list of top-level declarations) into a single
/// generic `Program` root.
pub fn program_to_generic(ast: &Ast) -> GenericNode {
    GenericNode::interior("Program", None, None, ast.iter().map(Node::to_generic).collect())
}
