//! The interpreter backend: parsing fused with execution.
//!
//! Reductions build closures instead of trees. Every Expression
//! reduces to an `ExprFn` and every Command to a `CmdFn`; running the
//! program is invoking the Program closure once against a fresh
//! [`Context`]. Lazy operators capture their operand closures
//! unevaluated, which is what makes short-circuiting work — there is no
//! separate tree walk that could eagerly evaluate them.

use std::rc::Rc;

use cinder_grammar::Nonterminal;
use cinder_runtime::value::IndexMap;
use cinder_runtime::{ops, Context, Direction, Error, MapKey, Pivot, Value};

use crate::engine::{Part, Reducer};

/// Evaluate an expression against the runtime.
pub type ExprFn = Rc<dyn Fn(&mut Context) -> Result<Value, Error>>;

/// Run a command for side effect.
pub type CmdFn = Rc<dyn Fn(&mut Context) -> Result<(), Error>>;

#[derive(Clone, Copy, Debug)]
pub enum NilaryOp {
    InputString,
    InputNumber,
    Random,
    PeekAll,
    Peek,
}

#[derive(Clone, Copy, Debug)]
pub enum UnaryOp {
    Negative,
    Length,
    Not,
    Cast,
    Random,
    Evaluate,
    Pop,
    Lowercase,
    Uppercase,
    Minimum,
    Maximum,
}

#[derive(Clone, Copy, Debug)]
pub enum BinaryOp {
    Sum,
    Difference,
    Product,
    Quotient,
    Modulo,
    Equals,
    Less,
    Greater,
    InclusiveRange,
    Mold,
    Exponentiate,
    AtIndex,
    Push,
    Join,
    Split,
    FindAll,
    Find,
}

#[derive(Clone, Copy, Debug)]
pub enum LazyOp {
    And,
    Or,
}

/// Backend value: whatever a production reduces to.
#[derive(Clone)]
pub enum Compiled {
    /// Separator; carries nothing.
    Unit,
    Dir(Direction),
    Dirs(Vec<Direction>),
    Name(char),
    Lit(Value),
    Expr(ExprFn),
    Exprs(Vec<ExprFn>),
    Pairs(Vec<(ExprFn, ExprFn)>),
    Side(Direction, ExprFn),
    Sides(Vec<(Direction, ExprFn)>),
    Nilary(NilaryOp),
    Unary(UnaryOp),
    Binary(BinaryOp),
    Lazy(LazyOp),
    Ternary,
    Cmd(CmdFn),
    Cmds(Vec<CmdFn>),
}

impl Compiled {
    fn expr(self) -> ExprFn {
        match self {
            Compiled::Expr(f) => f,
            other => unreachable!("expected expression, got {}", other.kind()),
        }
    }

    fn cmd(self) -> CmdFn {
        match self {
            Compiled::Cmd(f) => f,
            other => unreachable!("expected command, got {}", other.kind()),
        }
    }

    fn cmds(self) -> Vec<CmdFn> {
        match self {
            Compiled::Cmds(v) => v,
            other => unreachable!("expected program, got {}", other.kind()),
        }
    }

    fn dir(self) -> Direction {
        match self {
            Compiled::Dir(d) => d,
            other => unreachable!("expected arrow, got {}", other.kind()),
        }
    }

    fn dirs(self) -> Vec<Direction> {
        match self {
            Compiled::Dirs(d) => d,
            other => unreachable!("expected arrow list, got {}", other.kind()),
        }
    }

    fn name(self) -> char {
        match self {
            Compiled::Name(n) => n,
            other => unreachable!("expected name, got {}", other.kind()),
        }
    }

    fn sides(self) -> Vec<(Direction, ExprFn)> {
        match self {
            Compiled::Sides(s) => s,
            other => unreachable!("expected sides, got {}", other.kind()),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Compiled::Unit => "separator",
            Compiled::Dir(_) => "arrow",
            Compiled::Dirs(_) => "arrows",
            Compiled::Name(_) => "name",
            Compiled::Lit(_) => "literal",
            Compiled::Expr(_) => "expression",
            Compiled::Exprs(_) => "expressions",
            Compiled::Pairs(_) => "pairs",
            Compiled::Side(..) => "side",
            Compiled::Sides(_) => "sides",
            Compiled::Nilary(_) => "nilary operator",
            Compiled::Unary(_) => "unary operator",
            Compiled::Binary(_) => "binary operator",
            Compiled::Lazy(_) => "lazy operator",
            Compiled::Ternary => "ternary operator",
            Compiled::Cmd(_) => "command",
            Compiled::Cmds(_) => "program",
        }
    }
}

fn expr_fn(f: impl Fn(&mut Context) -> Result<Value, Error> + 'static) -> Compiled {
    Compiled::Expr(Rc::new(f))
}

fn cmd_fn(f: impl Fn(&mut Context) -> Result<(), Error> + 'static) -> Compiled {
    Compiled::Cmd(Rc::new(f))
}

pub(crate) fn run_all(commands: &[CmdFn], ctx: &mut Context) -> Result<(), Error> {
    for command in commands {
        command(ctx)?;
    }
    Ok(())
}

/// Evaluated sides of a polygon: each length expression runs at draw
/// time.
fn eval_sides(sides: &[(Direction, ExprFn)], ctx: &mut Context) -> Result<Vec<(Direction, i64)>, Error> {
    sides
        .iter()
        .map(|(dir, len)| Ok((*dir, len(ctx)?.as_int()?)))
        .collect()
}

/// Loop over a For operand: numbers count from zero, sequences yield
/// their elements. The body sees the element bound to `name` in a
/// fresh scope.
fn run_for(
    operand: Value,
    body: &CmdFn,
    refresh_ms: Option<i64>,
    ctx: &mut Context,
) -> Result<(), Error> {
    let items: Vec<Value> = match &operand {
        Value::Num(n) => (0..*n).map(Value::Num).collect(),
        Value::Real(f) => (0..*f as i64).map(Value::Num).collect(),
        Value::Text(t) => t.chars().map(|c| Value::Text(c.into())).collect(),
        Value::List(items) => items.borrow().clone(),
        other => return Err(Error::type_mismatch("For", other.type_name())),
    };
    let name = ctx.next_loop_name();
    ctx.push_scope();
    let result = (|| {
        for item in items {
            if let Some(ms) = refresh_ms {
                ctx.refresh(ms);
            }
            ctx.bind_local(name, item);
            body(ctx)?;
        }
        Ok(())
    })();
    ctx.pop_scope();
    result
}

/// Loop while the condition closure stays truthy; it is re-evaluated
/// every iteration, never cached.
fn run_while(
    condition: &ExprFn,
    body: &CmdFn,
    refresh_ms: Option<i64>,
    ctx: &mut Context,
) -> Result<(), Error> {
    ctx.push_scope();
    let result = (|| {
        while condition(ctx)?.truthy() {
            if let Some(ms) = refresh_ms {
                ctx.refresh(ms);
            }
            body(ctx)?;
        }
        Ok(())
    })();
    ctx.pop_scope();
    result
}

/// The interpreter reducer.
pub struct Interpreter;

fn values(parts: Vec<Part<Compiled>>) -> Vec<Compiled> {
    parts
        .into_iter()
        .filter_map(|part| match part {
            Part::Value(value) => Some(value),
            Part::Terminal(_) => None,
        })
        .collect()
}

impl Reducer for Interpreter {
    type Value = Compiled;

    fn string_literal(&self, text: &str) -> Compiled {
        Compiled::Lit(Value::text(text))
    }

    fn number_literal(&self, value: i64) -> Compiled {
        Compiled::Lit(Value::Num(value))
    }

    fn name_literal(&self, name: char) -> Compiled {
        Compiled::Name(name)
    }

    fn reduce(
        &self,
        nonterminal: Nonterminal,
        production: usize,
        parts: Vec<Part<Compiled>>,
    ) -> Compiled {
        let mut v = values(parts);
        match nonterminal {
            Nonterminal::Separator => Compiled::Unit,
            Nonterminal::Arrow => Compiled::Dir(
                [
                    Direction::UpLeft,
                    Direction::UpRight,
                    Direction::DownRight,
                    Direction::DownLeft,
                    Direction::Left,
                    Direction::Up,
                    Direction::Right,
                    Direction::Down,
                ][production],
            ),
            Nonterminal::Arrows => match production {
                0 => {
                    let mut dirs = vec![v.remove(0).dir()];
                    dirs.extend(v.pop().map(Compiled::dirs).unwrap_or_default());
                    Compiled::Dirs(dirs)
                }
                _ => Compiled::Dirs(vec![v.remove(0).dir()]),
            },
            Nonterminal::Multidirectional => {
                const ORTHOGONAL: [Direction; 4] = [
                    Direction::Right,
                    Direction::Down,
                    Direction::Left,
                    Direction::Up,
                ];
                const DIAGONAL: [Direction; 4] = [
                    Direction::UpRight,
                    Direction::DownRight,
                    Direction::DownLeft,
                    Direction::UpLeft,
                ];
                match production {
                    0 => v.remove(0),
                    6 => Compiled::Dirs(Vec::new()),
                    _ => {
                        let head: &[Direction] = match production {
                            1 => &ORTHOGONAL,
                            2 => &DIAGONAL,
                            3 => &[
                                Direction::Right,
                                Direction::DownRight,
                                Direction::Down,
                                Direction::DownLeft,
                                Direction::Left,
                                Direction::UpLeft,
                                Direction::Up,
                                Direction::UpRight,
                            ],
                            4 => &[Direction::Up, Direction::Down],
                            _ => &[Direction::Left, Direction::Right],
                        };
                        let mut dirs = head.to_vec();
                        dirs.extend(v.pop().map(Compiled::dirs).unwrap_or_default());
                        Compiled::Dirs(dirs)
                    }
                }
            }
            Nonterminal::Side => {
                let dir = v.remove(0).dir();
                let length = v.pop().map(Compiled::expr).expect("side length");
                Compiled::Side(dir, length)
            }
            Nonterminal::Sides => match production {
                0 => {
                    let Compiled::Side(dir, len) = v.remove(0) else {
                        unreachable!("sides begin with a side");
                    };
                    let mut sides = vec![(dir, len)];
                    sides.extend(v.pop().map(Compiled::sides).unwrap_or_default());
                    Compiled::Sides(sides)
                }
                _ => {
                    let Compiled::Side(dir, len) = v.remove(0) else {
                        unreachable!("sides begin with a side");
                    };
                    Compiled::Sides(vec![(dir, len)])
                }
            },
            Nonterminal::Expressions => match production {
                0 => {
                    let head = v.remove(0).expr();
                    let mut exprs = vec![head];
                    match v.pop() {
                        Some(Compiled::Exprs(tail)) => exprs.extend(tail),
                        _ => unreachable!("expressions tail"),
                    }
                    Compiled::Exprs(exprs)
                }
                _ => Compiled::Exprs(vec![v.remove(0).expr()]),
            },
            Nonterminal::PairExpressions => {
                let key = v.remove(0).expr();
                let value = v.remove(0).expr();
                let mut pairs = vec![(key, value)];
                if production == 0 {
                    match v.pop() {
                        Some(Compiled::Pairs(tail)) => pairs.extend(tail),
                        _ => unreachable!("pair tail"),
                    }
                }
                Compiled::Pairs(pairs)
            }
            Nonterminal::List => match production {
                0 => v.remove(0),
                _ => Compiled::Exprs(Vec::new()),
            },
            Nonterminal::ArrowList => match production {
                0 => v.remove(0),
                _ => Compiled::Dirs(Vec::new()),
            },
            Nonterminal::Dictionary => match production {
                0 => v.remove(0),
                _ => Compiled::Pairs(Vec::new()),
            },
            Nonterminal::Nilary => Compiled::Nilary(
                [
                    NilaryOp::InputString,
                    NilaryOp::InputNumber,
                    NilaryOp::Random,
                    NilaryOp::PeekAll,
                    NilaryOp::Peek,
                ][production],
            ),
            Nonterminal::Unary => Compiled::Unary(
                [
                    UnaryOp::Negative,
                    UnaryOp::Length,
                    UnaryOp::Not,
                    UnaryOp::Cast,
                    UnaryOp::Random,
                    UnaryOp::Evaluate,
                    UnaryOp::Pop,
                    UnaryOp::Lowercase,
                    UnaryOp::Uppercase,
                    UnaryOp::Minimum,
                    UnaryOp::Maximum,
                ][production],
            ),
            Nonterminal::Binary => Compiled::Binary(
                [
                    BinaryOp::Sum,
                    BinaryOp::Difference,
                    BinaryOp::Product,
                    BinaryOp::Quotient,
                    BinaryOp::Modulo,
                    BinaryOp::Equals,
                    BinaryOp::Less,
                    BinaryOp::Greater,
                    BinaryOp::InclusiveRange,
                    BinaryOp::Mold,
                    BinaryOp::Exponentiate,
                    BinaryOp::AtIndex,
                    BinaryOp::Push,
                    BinaryOp::Join,
                    BinaryOp::Split,
                    BinaryOp::FindAll,
                    BinaryOp::Find,
                ][production],
            ),
            Nonterminal::LazyBinary => Compiled::Lazy(if production == 0 {
                LazyOp::And
            } else {
                LazyOp::Or
            }),
            Nonterminal::LazyTernary => Compiled::Ternary,
            Nonterminal::OtherOperator => {
                let length = v.remove(0).expr();
                let dir = v.pop().map(Compiled::dir).expect("peek direction arrow");
                expr_fn(move |ctx| {
                    let length = length(ctx)?.as_int()?;
                    Ok(ctx.peek_direction(length, dir))
                })
            }
            Nonterminal::Expression => self.expression(production, v),
            Nonterminal::Program => match production {
                0 => {
                    let head = v.remove(0).cmd();
                    let mut commands = vec![head];
                    commands.extend(v.pop().map(Compiled::cmds).unwrap_or_default());
                    Compiled::Cmds(commands)
                }
                _ => Compiled::Cmds(Vec::new()),
            },
            Nonterminal::Body => match production {
                0 => {
                    let commands = v.remove(0).cmds();
                    cmd_fn(move |ctx| run_all(&commands, ctx))
                }
                _ => v.remove(0),
            },
            Nonterminal::Command => self.command(production, v),
            Nonterminal::String | Nonterminal::Number | Nonterminal::Name => {
                unreachable!("lexical classes reduce through literal hooks")
            }
        }
    }
}

impl Interpreter {
    fn expression(&self, production: usize, mut v: Vec<Compiled>) -> Compiled {
        match production {
            // Literals close over their value.
            0 | 1 => {
                let Compiled::Lit(value) = v.remove(0) else {
                    unreachable!("literal expression");
                };
                expr_fn(move |_| Ok(value.clone()))
            }
            // Name lookup: scope, then hidden presets, else Null.
            2 => {
                let name = v.remove(0).name();
                expr_fn(move |ctx| Ok(ctx.lookup(name)))
            }
            // List literal: element expressions evaluate at each use.
            3 => {
                let Compiled::Exprs(elements) = v.remove(0) else {
                    unreachable!("list expression");
                };
                expr_fn(move |ctx| {
                    let items = elements
                        .iter()
                        .map(|element| element(ctx))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(Value::list(items))
                })
            }
            // Dictionary literal.
            4 => {
                let Compiled::Pairs(pairs) = v.remove(0) else {
                    unreachable!("dictionary expression");
                };
                expr_fn(move |ctx| {
                    let mut entries = IndexMap::new();
                    for (key, value) in &pairs {
                        let key = MapKey::from_value(&key(ctx)?)?;
                        entries.insert(key, value(ctx)?);
                    }
                    Ok(Value::map(entries))
                })
            }
            // OtherOperator already reduced to a closure.
            5 => v.remove(0),
            // Ternary select: only the chosen branch runs.
            6 => {
                v.remove(0);
                let condition = v.remove(0).expr();
                let when_true = v.remove(0).expr();
                let when_false = v.remove(0).expr();
                expr_fn(move |ctx| {
                    if condition(ctx)?.truthy() {
                        when_true(ctx)
                    } else {
                        when_false(ctx)
                    }
                })
            }
            // And/Or: the deciding operand's value, right side lazy.
            7 => {
                let Compiled::Lazy(op) = v.remove(0) else {
                    unreachable!("lazy operator");
                };
                let left = v.remove(0).expr();
                let right = v.remove(0).expr();
                expr_fn(move |ctx| {
                    let first = left(ctx)?;
                    match op {
                        LazyOp::And if !first.truthy() => Ok(first),
                        LazyOp::Or if first.truthy() => Ok(first),
                        _ => right(ctx),
                    }
                })
            }
            8 => {
                let Compiled::Binary(op) = v.remove(0) else {
                    unreachable!("binary operator");
                };
                let left = v.remove(0).expr();
                let right = v.remove(0).expr();
                expr_fn(move |ctx| {
                    let (l, r) = (left(ctx)?, right(ctx)?);
                    match op {
                        BinaryOp::Sum => ops::add(&l, &r),
                        BinaryOp::Difference => ops::subtract(&l, &r),
                        BinaryOp::Product => ops::multiply(&l, &r),
                        BinaryOp::Quotient => ops::divide(&l, &r),
                        BinaryOp::Modulo => ops::modulo(&l, &r),
                        BinaryOp::Equals => Ok(ops::equals(&l, &r)),
                        BinaryOp::Less => ops::less(&l, &r),
                        BinaryOp::Greater => ops::greater(&l, &r),
                        BinaryOp::InclusiveRange => ops::inclusive_range(&l, &r),
                        BinaryOp::Mold => ops::mold(&l, &r),
                        BinaryOp::Exponentiate => ops::exponentiate(&l, &r),
                        BinaryOp::AtIndex => ops::at_index(&l, &r),
                        BinaryOp::Push => ops::push(&l, &r),
                        BinaryOp::Join => ops::join(&l, &r),
                        BinaryOp::Split => ops::split(&l, &r),
                        BinaryOp::FindAll => ops::find_all(&l, &r),
                        BinaryOp::Find => ops::find(&l, &r),
                    }
                })
            }
            9 => {
                let Compiled::Unary(op) = v.remove(0) else {
                    unreachable!("unary operator");
                };
                let operand = v.remove(0).expr();
                expr_fn(move |ctx| {
                    let value = operand(ctx)?;
                    match op {
                        UnaryOp::Negative => ops::negative(&value),
                        UnaryOp::Length => Ok(ops::length(&value)),
                        UnaryOp::Not => Ok(ops::not(&value)),
                        UnaryOp::Cast => ops::cast(&value),
                        UnaryOp::Random => ctx.random_bounded(&value),
                        UnaryOp::Evaluate => ctx.evaluate(&value.as_text(), false),
                        UnaryOp::Pop => ops::pop(&value),
                        UnaryOp::Lowercase => Ok(ops::lowercase(&value)),
                        UnaryOp::Uppercase => Ok(ops::uppercase(&value)),
                        UnaryOp::Minimum => ops::minimum(&value),
                        UnaryOp::Maximum => ops::maximum(&value),
                    }
                })
            }
            10 => {
                let Compiled::Nilary(op) = v.remove(0) else {
                    unreachable!("nilary operator");
                };
                expr_fn(move |ctx| match op {
                    NilaryOp::InputString => ctx.input_string(),
                    NilaryOp::InputNumber => ctx.input_number(),
                    NilaryOp::Random => Ok(ctx.random()),
                    NilaryOp::PeekAll => Ok(ctx.peek_all()),
                    NilaryOp::Peek => Ok(ctx.peek()),
                })
            }
            _ => unreachable!("expression production {production}"),
        }
    }

    fn command(&self, production: usize, mut v: Vec<Compiled>) -> Compiled {
        match production {
            0 => {
                let name = v.remove(0).name();
                cmd_fn(move |ctx| {
                    let value = ctx.input_string()?;
                    ctx.assign(name, value);
                    Ok(())
                })
            }
            1 => {
                let name = v.remove(0).name();
                cmd_fn(move |ctx| {
                    let value = ctx.input_number()?;
                    ctx.assign(name, value);
                    Ok(())
                })
            }
            2 => {
                let source = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let text = source(ctx)?.as_text();
                    ctx.evaluate(&text, true)?;
                    Ok(())
                })
            }
            3 => {
                let dir = v.remove(0).dir();
                v.remove(0);
                let value = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let value = value(ctx)?;
                    ctx.print_value(&value, Some(&[dir]), false)
                })
            }
            4 => {
                let value = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let value = value(ctx)?;
                    ctx.print_value(&value, None, false)
                })
            }
            5 => {
                let dirs = v.remove(0).dirs();
                v.remove(0);
                let value = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let value = value(ctx)?;
                    ctx.print_value(&value, Some(&dirs), true)
                })
            }
            6 => {
                let value = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let value = value(ctx)?;
                    ctx.print_value(&value, None, true)
                })
            }
            // Polygons: hollow first (7, 8), then filled (9, 10).
            7 | 9 => {
                let fill = production == 9;
                let sides = v.remove(0).sides();
                v.remove(0);
                let glyph = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let sides = eval_sides(&sides, ctx)?;
                    let text = glyph(ctx)?.as_text();
                    ctx.polygon(&sides, &text, fill);
                    Ok(())
                })
            }
            8 | 10 => {
                let fill = production == 10;
                let dirs = v.remove(0).dirs();
                v.remove(0);
                let length = v.remove(0).expr();
                let glyph = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let side_length = length(ctx)?.as_int()?;
                    let sides: Vec<(Direction, i64)> =
                        dirs.iter().map(|&dir| (dir, side_length)).collect();
                    let text = glyph(ctx)?.as_text();
                    ctx.polygon(&sides, &text, fill);
                    Ok(())
                })
            }
            11 => {
                let width = v.remove(0).expr();
                let height = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let (w, h) = (width(ctx)?.as_int()?, height(ctx)?.as_int()?);
                    ctx.rectangle(w, h);
                    Ok(())
                })
            }
            12 => {
                let width = v.remove(0).expr();
                let height = v.remove(0).expr();
                let glyph = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let (w, h) = (width(ctx)?.as_int()?, height(ctx)?.as_int()?);
                    let text = glyph(ctx)?.as_text();
                    ctx.box_outline(w, h, &text);
                    Ok(())
                })
            }
            13 | 14 => {
                let dir = v.remove(0).dir();
                cmd_fn(move |ctx| {
                    ctx.move_cursor(dir, 1);
                    Ok(())
                })
            }
            15 => {
                let count = v.remove(0).expr();
                let dir = v.remove(0).dir();
                cmd_fn(move |ctx| {
                    let count = count(ctx)?.as_int()?;
                    ctx.move_cursor(dir, count);
                    Ok(())
                })
            }
            16 | 18 => {
                let sense = if production == 16 {
                    Pivot::Left
                } else {
                    Pivot::Right
                };
                let count = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let count = count(ctx)?.as_int()?;
                    ctx.pivot(sense, count);
                    Ok(())
                })
            }
            17 | 19 => {
                let sense = if production == 17 {
                    Pivot::Left
                } else {
                    Pivot::Right
                };
                cmd_fn(move |ctx| {
                    ctx.pivot(sense, 1);
                    Ok(())
                })
            }
            20 => {
                let x = v.remove(0).expr();
                let y = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let (x, y) = (x(ctx)?.as_int()?, y(ctx)?.as_int()?);
                    ctx.jump(x, y);
                    Ok(())
                })
            }
            21 => {
                let steps = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let steps = steps(ctx)?.as_int()?;
                    ctx.rotate_transform(steps)
                })
            }
            22 | 23 => {
                let dirs = arrow_operand(v.remove(0));
                cmd_fn(move |ctx| {
                    ctx.reflect_transform(&dirs);
                    Ok(())
                })
            }
            24 | 25 => {
                let dirs = arrow_operand(v.remove(0));
                cmd_fn(move |ctx| {
                    ctx.reflect_mirror(&dirs);
                    Ok(())
                })
            }
            26 => {
                let steps = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let steps = steps(ctx)?.as_int()?;
                    ctx.rotate_copy(steps)
                })
            }
            27 | 28 => {
                let dirs = arrow_operand(v.remove(0));
                cmd_fn(move |ctx| {
                    ctx.reflect_copy(&dirs);
                    Ok(())
                })
            }
            29 => {
                let steps = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let steps = steps(ctx)?.as_int()?;
                    ctx.rotate_overlap(steps)
                })
            }
            30 | 31 => {
                let dirs = arrow_operand(v.remove(0));
                cmd_fn(move |ctx| {
                    ctx.reflect_overlap(&dirs);
                    Ok(())
                })
            }
            32 => {
                let steps = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let steps = steps(ctx)?.as_int()?;
                    ctx.rotate(steps)
                })
            }
            33 => {
                let dir = v.remove(0).dir();
                cmd_fn(move |ctx| {
                    ctx.reflect(dir);
                    Ok(())
                })
            }
            34 => {
                let dx = v.remove(0).expr();
                let dy = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let (dx, dy) = (dx(ctx)?.as_int()?, dy(ctx)?.as_int()?);
                    ctx.copy_translated(dx, dy);
                    Ok(())
                })
            }
            35 => {
                let count = v.remove(0).expr();
                let body = v.remove(0).cmd();
                cmd_fn(move |ctx| {
                    let operand = count(ctx)?;
                    run_for(operand, &body, None, ctx)
                })
            }
            36 => {
                let condition = v.remove(0).expr();
                let body = v.remove(0).cmd();
                cmd_fn(move |ctx| run_while(&condition, &body, None, ctx))
            }
            37 => {
                let condition = v.remove(0).expr();
                let when_true = v.remove(0).cmd();
                let when_false = v.remove(0).cmd();
                cmd_fn(move |ctx| {
                    let branch = if condition(ctx)?.truthy() {
                        &when_true
                    } else {
                        &when_false
                    };
                    ctx.push_scope();
                    let result = branch(ctx);
                    ctx.pop_scope();
                    result
                })
            }
            38 => {
                let condition = v.remove(0).expr();
                let when_true = v.remove(0).cmd();
                cmd_fn(move |ctx| {
                    if condition(ctx)?.truthy() {
                        ctx.push_scope();
                        let result = when_true(ctx);
                        ctx.pop_scope();
                        result
                    } else {
                        Ok(())
                    }
                })
            }
            39 => {
                let value = v.remove(0).expr();
                let name = v.remove(0).name();
                cmd_fn(move |ctx| {
                    let value = value(ctx)?;
                    ctx.assign(name, value);
                    Ok(())
                })
            }
            40 => {
                let glyph = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let text = glyph(ctx)?.as_text();
                    ctx.fill(&text);
                    Ok(())
                })
            }
            41 => {
                let glyph = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let text = glyph(ctx)?.as_text();
                    ctx.set_background(&text);
                    Ok(())
                })
            }
            42 => cmd_fn(|ctx| {
                ctx.dump();
                Ok(())
            }),
            43 => {
                let millis = v.remove(0).expr();
                let count = v.remove(0).expr();
                let body = v.remove(0).cmd();
                cmd_fn(move |ctx| {
                    let ms = millis(ctx)?.as_int()?;
                    let operand = count(ctx)?;
                    run_for(operand, &body, Some(ms), ctx)
                })
            }
            44 => {
                let millis = v.remove(0).expr();
                let condition = v.remove(0).expr();
                let body = v.remove(0).cmd();
                cmd_fn(move |ctx| {
                    let ms = millis(ctx)?.as_int()?;
                    run_while(&condition, &body, Some(ms), ctx)
                })
            }
            45 => {
                let millis = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let ms = millis(ctx)?.as_int()?;
                    ctx.refresh(ms);
                    Ok(())
                })
            }
            46 => cmd_fn(|ctx| {
                ctx.refresh(0);
                Ok(())
            }),
            47 => {
                let width = v.remove(0).expr();
                let height = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let (w, h) = (width(ctx)?.as_int()?, height(ctx)?.as_int()?);
                    ctx.trim(w, h);
                    Ok(())
                })
            }
            48 => cmd_fn(|ctx| {
                ctx.clear();
                Ok(())
            }),
            49 => {
                let gap_x = v.remove(0).expr();
                let gap_y = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let (x, y) = (gap_x(ctx)?.as_int()?, gap_y(ctx)?.as_int()?);
                    ctx.extend(x, y);
                    Ok(())
                })
            }
            50 => {
                let gap = v.remove(0).expr();
                cmd_fn(move |ctx| {
                    let gap = gap(ctx)?.as_int()?;
                    ctx.extend(gap, gap);
                    Ok(())
                })
            }
            _ => unreachable!("command production {production}"),
        }
    }
}

/// Reflect commands take a single arrow or an arrow list.
fn arrow_operand(value: Compiled) -> Vec<Direction> {
    match value {
        Compiled::Dir(dir) => vec![dir],
        Compiled::Dirs(dirs) => dirs,
        other => unreachable!("expected arrow operand, got {}", other.kind()),
    }
}
