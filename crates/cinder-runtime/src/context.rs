//! The execution context: cursor, canvas, scope and collaborators.
//!
//! One `Context` is created per program run and threaded through every
//! interpreter closure. It owns everything mutable — the canvas, the
//! cursor and facing direction, the scope stack, the input queue and
//! the RNG — so concurrent runs cannot interfere.

use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::canvas::{Canvas, Cell};
use crate::direction::{Direction, Pivot};
use crate::error::{Error, Result};
use crate::render::{Evaluator, Renderer};
use crate::value::Value;

/// Candidate loop-variable names, claimed in order by nested `For`
/// loops.
const LOOP_NAMES: &str = "ικλμνξπρςστυφχψωαβγδεζηθ";

const PRINTABLE_ASCII: &str = " !\"#$%&'()*+,-./0123456789:;<=>?@\
ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";

/// Runtime state for one program run.
pub struct Context {
    pub canvas: Canvas,
    x: i64,
    y: i64,
    direction: Direction,
    background: char,
    scopes: Vec<IndexMap<char, Value>>,
    hidden: IndexMap<char, Value>,
    inputs: VecDeque<String>,
    rng: StdRng,
    renderer: Option<Box<dyn Renderer>>,
    evaluator: Option<Rc<dyn Evaluator>>,
}

impl Default for Context {
    fn default() -> Context {
        Context::new()
    }
}

impl Context {
    pub fn new() -> Context {
        let mut hidden = IndexMap::new();
        hidden.insert('α', Value::text("ABCDEFGHIJKLMNOPQRSTUVWXYZ"));
        hidden.insert('β', Value::text("abcdefghijklmnopqrstuvwxyz"));
        hidden.insert('γ', Value::text(PRINTABLE_ASCII));
        Context {
            canvas: Canvas::new(),
            x: 0,
            y: 0,
            direction: Direction::Right,
            background: ' ',
            scopes: vec![IndexMap::new()],
            hidden,
            inputs: VecDeque::new(),
            rng: StdRng::from_entropy(),
            renderer: None,
            evaluator: None,
        }
    }

    /// Deterministic RNG, for tests and reproducible runs.
    pub fn with_seed(seed: u64) -> Context {
        let mut ctx = Context::new();
        ctx.rng = StdRng::seed_from_u64(seed);
        ctx
    }

    pub fn queue_input(&mut self, input: impl Into<String>) {
        self.inputs.push_back(input.into());
    }

    pub fn has_input(&self) -> bool {
        !self.inputs.is_empty()
    }

    pub fn install_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.renderer = Some(renderer);
    }

    pub fn install_evaluator(&mut self, evaluator: Rc<dyn Evaluator>) {
        self.evaluator = Some(evaluator);
    }

    pub fn cursor(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    pub fn facing(&self) -> Direction {
        self.direction
    }

    pub fn background(&self) -> char {
        self.background
    }

    /// Render the current canvas the way the renderer will see it.
    pub fn snapshot(&self) -> String {
        self.canvas.render(self.background)
    }

    // --- cursor ---------------------------------------------------------

    pub fn move_cursor(&mut self, direction: Direction, count: i64) {
        let (dx, dy) = direction.vector();
        self.x += dx * count;
        self.y += dy * count;
    }

    /// Set absolute cursor coordinates.
    pub fn jump(&mut self, x: i64, y: i64) {
        self.x = x;
        self.y = y;
    }

    /// Rotate the facing direction by `count` 90° pivots (two 45° table
    /// steps each). Negative counts pivot the other way.
    pub fn pivot(&mut self, sense: Pivot, count: i64) {
        let sense = if count < 0 {
            match sense {
                Pivot::Left => Pivot::Right,
                Pivot::Right => Pivot::Left,
            }
        } else {
            sense
        };
        for _ in 0..count.unsigned_abs() * 2 {
            self.direction = self.direction.pivot(sense);
        }
    }

    // --- scope ----------------------------------------------------------

    /// Resolve a name: innermost scope outward, then the hidden preset
    /// scope, else Null. Never an error.
    pub fn lookup(&self, name: char) -> Value {
        for scope in self.scopes.iter().rev() {
            if let Some(value) = scope.get(&name) {
                return value.clone();
            }
        }
        self.hidden.get(&name).cloned().unwrap_or(Value::Null)
    }

    /// Bind into the innermost scope that already has `name`, else the
    /// current scope. Values alias; lists are shared, not copied.
    pub fn assign(&mut self, name: char, value: Value) {
        for scope in self.scopes.iter_mut().rev() {
            if scope.contains_key(&name) {
                scope.insert(name, value);
                return;
            }
        }
        self.scopes
            .last_mut()
            .expect("scope stack is never empty")
            .insert(name, value);
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(IndexMap::new());
    }

    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Bind directly in the current scope, shadowing outer bindings.
    pub fn bind_local(&mut self, name: char, value: Value) {
        self.scopes
            .last_mut()
            .expect("scope stack is never empty")
            .insert(name, value);
    }

    /// First loop-variable name unused in any live scope.
    pub fn next_loop_name(&self) -> char {
        LOOP_NAMES
            .chars()
            .find(|name| !self.scopes.iter().any(|scope| scope.contains_key(name)))
            .unwrap_or('ι')
    }

    // --- input and randomness -------------------------------------------

    pub fn input_string(&mut self) -> Result<Value> {
        self.inputs
            .pop_front()
            .map(Value::Text)
            .ok_or(Error::EndOfInput)
    }

    pub fn input_number(&mut self) -> Result<Value> {
        let raw = self.inputs.pop_front().ok_or(Error::EndOfInput)?;
        raw.trim()
            .parse()
            .map(Value::Num)
            .map_err(|_| Error::type_mismatch("InputNumber", format!("input {raw:?}")))
    }

    /// `Random` with no operand: uniform in [0, 1).
    pub fn random(&mut self) -> Value {
        Value::Real(self.rng.gen::<f64>())
    }

    /// `Random(operand)`: below a number, or a uniform element of a
    /// sequence.
    pub fn random_bounded(&mut self, operand: &Value) -> Result<Value> {
        match operand {
            Value::Num(n) if *n > 0 => Ok(Value::Num(self.rng.gen_range(0..*n))),
            Value::Num(_) => Ok(Value::Num(0)),
            Value::Text(t) if !t.is_empty() => {
                let chars: Vec<char> = t.chars().collect();
                let pick = self.rng.gen_range(0..chars.len());
                Ok(Value::Text(chars[pick].into()))
            }
            Value::List(items) if !items.borrow().is_empty() => {
                let items = items.borrow();
                let pick = self.rng.gen_range(0..items.len());
                Ok(items[pick].clone())
            }
            other => Err(Error::type_mismatch("Random", other.type_name())),
        }
    }

    // --- nested evaluation ----------------------------------------------

    /// Run `source` through the installed evaluator, as an expression
    /// or as a whole program.
    pub fn evaluate(&mut self, source: &str, as_program: bool) -> Result<Value> {
        let evaluator = self
            .evaluator
            .clone()
            .ok_or_else(|| Error::Eval("no evaluator installed".into()))?;
        if as_program {
            evaluator.run_program(source, self)?;
            Ok(Value::Null)
        } else {
            evaluator.eval_expression(source, self)
        }
    }

    // --- peeking --------------------------------------------------------

    /// Glyph of the cell one step ahead of the cursor, empty text when
    /// unset.
    pub fn peek(&self) -> Value {
        let (dx, dy) = self.direction.vector();
        match self.canvas.get(self.x + dx, self.y + dy) {
            Some(cell) => Value::Text(cell.glyph.into()),
            None => Value::text(""),
        }
    }

    /// The whole rendered canvas as multiline text.
    pub fn peek_all(&self) -> Value {
        Value::Text(self.snapshot())
    }

    /// `length` glyphs along `direction` from the cursor; unset cells
    /// read as the background glyph.
    pub fn peek_direction(&self, length: i64, direction: Direction) -> Value {
        let (dx, dy) = direction.vector();
        let mut out = String::new();
        let (mut x, mut y) = (self.x, self.y);
        for _ in 0..length.max(0) {
            out.push(self.canvas.get(x, y).map_or(self.background, |c| c.glyph));
            x += dx;
            y += dy;
        }
        Value::Text(out)
    }

    // --- printing and drawing -------------------------------------------

    /// `Print`: numbers draw a line of the direction's glyph, text is
    /// written character by character, wrapping to the newline
    /// direction at line breaks. With several directions the same write
    /// is replayed from the same origin. `restore` puts the cursor back
    /// afterwards (Multiprint).
    pub fn print_value(
        &mut self,
        value: &Value,
        directions: Option<&[Direction]>,
        restore: bool,
    ) -> Result<()> {
        let dirs: Vec<Direction> = match directions {
            Some(dirs) if !dirs.is_empty() => dirs.to_vec(),
            _ => vec![self.direction],
        };
        let origin = (self.x, self.y);
        let mut end = origin;
        for dir in dirs {
            self.x = origin.0;
            self.y = origin.1;
            match value {
                Value::Num(n) => self.draw_line(dir, *n),
                Value::Real(f) => self.draw_line(dir, *f as i64),
                other => self.write_text(&other.as_text(), dir),
            }
            end = (self.x, self.y);
        }
        if restore {
            self.x = origin.0;
            self.y = origin.1;
        } else {
            self.x = end.0;
            self.y = end.1;
        }
        Ok(())
    }

    fn draw_line(&mut self, direction: Direction, length: i64) {
        let glyph = direction.line_glyph();
        for _ in 0..length.max(0) {
            self.canvas.put(self.x, self.y, glyph);
            self.move_cursor(direction, 1);
        }
    }

    fn write_text(&mut self, text: &str, direction: Direction) {
        let mut line_start = (self.x, self.y);
        for ch in text.chars() {
            if ch == '\n' {
                let (dx, dy) = direction.newline().vector();
                line_start = (line_start.0 + dx, line_start.1 + dy);
                self.x = line_start.0;
                self.y = line_start.1;
            } else {
                self.canvas.put(self.x, self.y, ch);
                self.move_cursor(direction, 1);
            }
        }
    }

    /// Draw a polygon from `(direction, length)` sides. Sides share
    /// corners: each starts on the cell the previous one ended on.
    /// With `fill`, a boundary that closes back on its starting cell
    /// has its interior flooded with the same glyph.
    pub fn polygon(&mut self, sides: &[(Direction, i64)], text: &str, fill: bool) {
        let glyph = text.chars().next();
        let start = (self.x, self.y);
        let mut boundary: Vec<((i64, i64), char)> = Vec::new();
        let (mut x, mut y) = start;
        for &(direction, length) in sides {
            let side_glyph = glyph.unwrap_or_else(|| direction.line_glyph());
            let (dx, dy) = direction.vector();
            for step in 0..length.max(0) {
                boundary.push(((x, y), side_glyph));
                if step < length - 1 {
                    x += dx;
                    y += dy;
                }
            }
        }
        for &((bx, by), ch) in &boundary {
            self.canvas.put(bx, by, ch);
        }
        if fill && (x, y) == start && !boundary.is_empty() {
            if let Some(ch) = glyph {
                self.fill_interior(&boundary, ch);
            }
        }
        self.x = x;
        self.y = y;
    }

    /// Flood everything inside the boundary: cells of the boundary's
    /// bounding box not reachable from outside it. Callers guarantee a
    /// non-empty boundary.
    fn fill_interior(&mut self, boundary: &[((i64, i64), char)], glyph: char) {
        let wall: std::collections::HashSet<(i64, i64)> =
            boundary.iter().map(|&(pos, _)| pos).collect();
        let (mut min_x, mut max_x) = (i64::MAX, i64::MIN);
        let (mut min_y, mut max_y) = (i64::MAX, i64::MIN);
        for &((x, y), _) in boundary {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        let (min_x, max_x) = (min_x - 1, max_x + 1);
        let (min_y, max_y) = (min_y - 1, max_y + 1);
        let mut outside = std::collections::HashSet::new();
        let mut queue = VecDeque::from([(min_x, min_y)]);
        while let Some((cx, cy)) = queue.pop_front() {
            if cx < min_x || cx > max_x || cy < min_y || cy > max_y {
                continue;
            }
            if wall.contains(&(cx, cy)) || !outside.insert((cx, cy)) {
                continue;
            }
            queue.extend([(cx + 1, cy), (cx - 1, cy), (cx, cy + 1), (cx, cy - 1)]);
        }
        for cy in min_y + 1..max_y {
            for cx in min_x + 1..max_x {
                if !wall.contains(&(cx, cy)) && !outside.contains(&(cx, cy)) {
                    self.canvas.put(cx, cy, glyph);
                }
            }
        }
    }

    /// Hollow rectangle drawn with the line glyphs: `-` edges, `|`
    /// sides owning the corners. The cursor does not move.
    pub fn rectangle(&mut self, width: i64, height: i64) {
        if width < 1 || height < 1 {
            return;
        }
        let (x0, y0) = (self.x, self.y);
        let (x1, y1) = (x0 + width - 1, y0 + height - 1);
        for x in x0 + 1..x1 {
            self.canvas.put(x, y0, '-');
            self.canvas.put(x, y1, '-');
        }
        for y in y0..=y1 {
            self.canvas.put(x0, y, '|');
            self.canvas.put(x1, y, '|');
        }
    }

    /// Hollow rectangle of `text`, cycled along the border.
    pub fn box_outline(&mut self, width: i64, height: i64, text: &str) {
        if width < 1 || height < 1 {
            return;
        }
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return self.rectangle(width, height);
        }
        let start = (self.x, self.y);
        let sides = [
            (Direction::Right, width),
            (Direction::Down, height),
            (Direction::Left, width),
            (Direction::Up, height),
        ];
        let (mut x, mut y) = start;
        let mut index = 0usize;
        for (side_index, &(direction, length)) in sides.iter().enumerate() {
            let (dx, dy) = direction.vector();
            for step in 0..length {
                // Corners are shared; skip the duplicate first cell of
                // every side after the first.
                if side_index == 0 || step > 0 {
                    self.canvas.put(x, y, chars[index % chars.len()]);
                    index += 1;
                }
                if step < length - 1 {
                    x += dx;
                    y += dy;
                }
            }
        }
        self.x = start.0;
        self.y = start.1;
    }

    // --- whole-canvas transforms ----------------------------------------

    /// Exact image of the drawn cells rotated `steps` eighth-turns
    /// clockwise around the cursor. Odd steps have no grid image.
    fn rotated_image(&self, steps: i64) -> Result<HashMap<(i64, i64), Cell>> {
        if steps.rem_euclid(2) != 0 {
            return Err(Error::UnsupportedRotation(steps));
        }
        let quarter_turns = (steps / 2).rem_euclid(4);
        let mut image = HashMap::new();
        for ((cx, cy), cell) in self.canvas.cells() {
            let (mut dx, mut dy) = (cx - self.x, cy - self.y);
            for _ in 0..quarter_turns {
                (dx, dy) = (-dy, dx);
            }
            image.insert((self.x + dx, self.y + dy), cell);
        }
        Ok(image)
    }

    pub fn rotate_transform(&mut self, steps: i64) -> Result<()> {
        debug!(steps, "rotate transform");
        let image = self.rotated_image(steps)?;
        self.canvas.replace(image);
        Ok(())
    }

    pub fn rotate_copy(&mut self, steps: i64) -> Result<()> {
        let image = self.rotated_image(steps)?;
        self.canvas.merge(image, true);
        Ok(())
    }

    pub fn rotate_overlap(&mut self, steps: i64) -> Result<()> {
        let image = self.rotated_image(steps)?;
        self.canvas.merge(image, false);
        Ok(())
    }

    /// Reflect a cursor-relative offset about the axis through the
    /// cursor perpendicular to `direction`.
    fn reflect_offset(direction: Direction, dx: i64, dy: i64) -> (i64, i64) {
        match direction {
            Direction::Left | Direction::Right => (-dx, dy),
            Direction::Up | Direction::Down => (dx, -dy),
            Direction::UpRight | Direction::DownLeft => (dy, dx),
            Direction::UpLeft | Direction::DownRight => (-dy, -dx),
        }
    }

    fn reflected_image(&self, direction: Direction) -> HashMap<(i64, i64), Cell> {
        let mut image = HashMap::new();
        for ((cx, cy), cell) in self.canvas.cells() {
            let (dx, dy) = Self::reflect_offset(direction, cx - self.x, cy - self.y);
            image.insert((self.x + dx, self.y + dy), cell);
        }
        image
    }

    pub fn reflect_transform(&mut self, directions: &[Direction]) {
        for &direction in directions {
            let image = self.reflected_image(direction);
            self.canvas.replace(image);
        }
    }

    pub fn reflect_copy(&mut self, directions: &[Direction]) {
        for &direction in directions {
            let image = self.reflected_image(direction);
            self.canvas.merge(image, true);
        }
    }

    pub fn reflect_overlap(&mut self, directions: &[Direction]) {
        for &direction in directions {
            let image = self.reflected_image(direction);
            self.canvas.merge(image, false);
        }
    }

    /// Flip the drawing in place about its bounding-box axis. The
    /// cursor does not move.
    pub fn reflect(&mut self, direction: Direction) {
        self.flip_in_place(direction, false);
    }

    /// Like [`Context::reflect`], but also mirrors reflectable glyphs
    /// (`/` ↔ `\`, `<` ↔ `>`, brackets).
    pub fn reflect_mirror(&mut self, directions: &[Direction]) {
        for &direction in directions {
            self.flip_in_place(direction, true);
        }
    }

    fn flip_in_place(&mut self, direction: Direction, mirror_glyphs: bool) {
        let Some(bounds) = self.canvas.bounds() else {
            return;
        };
        let mut image = HashMap::new();
        for ((cx, cy), mut cell) in self.canvas.cells() {
            let pos = match direction {
                Direction::Left | Direction::Right => (bounds.min_x + bounds.max_x - cx, cy),
                Direction::Up | Direction::Down => (cx, bounds.min_y + bounds.max_y - cy),
                Direction::UpLeft | Direction::DownRight => {
                    (bounds.min_x + (cy - bounds.min_y), bounds.min_y + (cx - bounds.min_x))
                }
                Direction::UpRight | Direction::DownLeft => {
                    (bounds.min_x + (bounds.max_y - cy), bounds.min_y + (bounds.max_x - cx))
                }
            };
            if mirror_glyphs {
                cell.glyph = Self::mirror_glyph(direction, cell.glyph);
            }
            image.insert(pos, cell);
        }
        self.canvas.replace(image);
    }

    fn mirror_glyph(direction: Direction, glyph: char) -> char {
        let horizontal = matches!(direction, Direction::Left | Direction::Right);
        match (horizontal, glyph) {
            (_, '/') => '\\',
            (_, '\\') => '/',
            (true, '<') => '>',
            (true, '>') => '<',
            (true, '(') => ')',
            (true, ')') => '(',
            (true, '[') => ']',
            (true, ']') => '[',
            (true, '{') => '}',
            (true, '}') => '{',
            (false, '^') => 'v',
            (false, 'v') => '^',
            _ => glyph,
        }
    }

    /// Rotate the drawing in place about its bounding box by even
    /// eighth-turns, keeping the top-left corner fixed.
    pub fn rotate(&mut self, steps: i64) -> Result<()> {
        if steps.rem_euclid(2) != 0 {
            return Err(Error::UnsupportedRotation(steps));
        }
        let Some(bounds) = self.canvas.bounds() else {
            return Ok(());
        };
        let quarter_turns = (steps / 2).rem_euclid(4);
        let mut image = HashMap::new();
        let mut min_x = i64::MAX;
        let mut min_y = i64::MAX;
        let mut rotated = Vec::new();
        for ((cx, cy), cell) in self.canvas.cells() {
            let (mut dx, mut dy) = (cx - bounds.min_x, cy - bounds.min_y);
            for _ in 0..quarter_turns {
                (dx, dy) = (-dy, dx);
            }
            min_x = min_x.min(dx);
            min_y = min_y.min(dy);
            rotated.push(((dx, dy), cell));
        }
        for ((dx, dy), cell) in rotated {
            image.insert((bounds.min_x + dx - min_x, bounds.min_y + dy - min_y), cell);
        }
        self.canvas.replace(image);
        Ok(())
    }

    /// Duplicate the drawing translated by `(dx, dy)`; the replica
    /// overwrites on collision.
    pub fn copy_translated(&mut self, dx: i64, dy: i64) {
        let mut image = HashMap::new();
        for ((cx, cy), cell) in self.canvas.cells() {
            image.insert((cx + dx, cy + dy), cell);
        }
        self.canvas.merge(image, true);
    }

    // --- canvas maintenance ---------------------------------------------

    /// Flood-fill the cursor's 4-connected empty/background region
    /// within the drawn bounding box, cycling `text` over the region in
    /// scan order.
    pub fn fill(&mut self, text: &str) {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return;
        }
        let Some(bounds) = self.canvas.bounds() else {
            return;
        };
        if !bounds.contains(self.x, self.y) || self.canvas.is_wall(self.x, self.y) {
            return;
        }
        let mut region = std::collections::HashSet::new();
        let mut queue = VecDeque::from([(self.x, self.y)]);
        while let Some((cx, cy)) = queue.pop_front() {
            if !bounds.contains(cx, cy)
                || self.canvas.is_wall(cx, cy)
                || !region.insert((cx, cy))
            {
                continue;
            }
            queue.extend([(cx + 1, cy), (cx - 1, cy), (cx, cy + 1), (cx, cy - 1)]);
        }
        let mut cells: Vec<(i64, i64)> = region.into_iter().collect();
        cells.sort_by_key(|&(x, y)| (y, x));
        for (i, (cx, cy)) in cells.into_iter().enumerate() {
            self.canvas
                .put_background(cx, cy, chars[i % chars.len()]);
        }
    }

    pub fn set_background(&mut self, text: &str) {
        self.background = text.chars().next().unwrap_or(' ');
    }

    /// Erase everything and home the cursor.
    pub fn clear(&mut self) {
        self.canvas.clear();
        self.x = 0;
        self.y = 0;
    }

    /// Discard cells outside the `width` × `height` window at the
    /// cursor.
    pub fn trim(&mut self, width: i64, height: i64) {
        let (x0, y0) = (self.x, self.y);
        self.canvas
            .retain(|x, y| (x0..x0 + width).contains(&x) && (y0..y0 + height).contains(&y));
    }

    /// Insert `gap_x` blank columns and `gap_y` blank rows between
    /// occupied ones, scaling about the top-left corner.
    pub fn extend(&mut self, gap_x: i64, gap_y: i64) {
        let Some(bounds) = self.canvas.bounds() else {
            return;
        };
        let (sx, sy) = (gap_x.max(0) + 1, gap_y.max(0) + 1);
        let mut image = HashMap::new();
        for ((cx, cy), cell) in self.canvas.cells() {
            image.insert(
                (
                    bounds.min_x + (cx - bounds.min_x) * sx,
                    bounds.min_y + (cy - bounds.min_y) * sy,
                ),
                cell,
            );
        }
        self.canvas.replace(image);
    }

    // --- rendering ------------------------------------------------------

    /// Hand the current canvas to the renderer immediately.
    pub fn dump(&mut self) {
        let frame = self.snapshot();
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.frame(&frame);
        }
    }

    /// Render a frame, then pause `millis` for animation pacing.
    pub fn refresh(&mut self, millis: i64) {
        self.dump();
        if millis > 0 {
            std::thread::sleep(Duration::from_millis(millis as u64));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_right_writes_and_advances() {
        let mut ctx = Context::new();
        ctx.print_value(&Value::text("AB"), Some(&[Direction::Right]), false)
            .unwrap();
        assert_eq!(ctx.canvas.get(0, 0).unwrap().glyph, 'A');
        assert_eq!(ctx.canvas.get(1, 0).unwrap().glyph, 'B');
        assert_eq!(ctx.cursor(), (2, 0));
    }

    #[test]
    fn print_wraps_at_line_breaks() {
        let mut ctx = Context::new();
        ctx.print_value(&Value::text("ab\ncd"), Some(&[Direction::Right]), false)
            .unwrap();
        assert_eq!(ctx.canvas.render(' '), "ab\ncd");
    }

    #[test]
    fn print_down_walks_downward() {
        let mut ctx = Context::new();
        ctx.print_value(&Value::text("ab"), Some(&[Direction::Down]), false)
            .unwrap();
        assert_eq!(ctx.canvas.get(0, 0).unwrap().glyph, 'a');
        assert_eq!(ctx.canvas.get(0, 1).unwrap().glyph, 'b');
        assert_eq!(ctx.cursor(), (0, 2));
    }

    #[test]
    fn printing_a_number_draws_a_line() {
        let mut ctx = Context::new();
        ctx.print_value(&Value::Num(3), Some(&[Direction::Right]), false)
            .unwrap();
        assert_eq!(ctx.canvas.render(' '), "---");
        assert_eq!(ctx.cursor(), (3, 0));
    }

    #[test]
    fn multiprint_restores_the_cursor() {
        let mut ctx = Context::new();
        ctx.print_value(
            &Value::text("x"),
            Some(&[Direction::Right, Direction::Down]),
            true,
        )
        .unwrap();
        assert_eq!(ctx.cursor(), (0, 0));
        assert_eq!(ctx.canvas.get(0, 0).unwrap().glyph, 'x');
    }

    #[test]
    fn rotate_copy_quarter_turn_maps_coordinates() {
        let mut ctx = Context::new();
        ctx.canvas.put(1, 0, 'a');
        ctx.canvas.put(2, 0, 'b');
        ctx.rotate_copy(2).unwrap();
        // Originals survive (copy semantics)...
        assert_eq!(ctx.canvas.get(1, 0).unwrap().glyph, 'a');
        assert_eq!(ctx.canvas.get(2, 0).unwrap().glyph, 'b');
        // ...and the replica lands on the 90°-rotated offsets.
        assert_eq!(ctx.canvas.get(0, 1).unwrap().glyph, 'a');
        assert_eq!(ctx.canvas.get(0, 2).unwrap().glyph, 'b');
    }

    #[test]
    fn odd_rotation_is_rejected() {
        let mut ctx = Context::new();
        ctx.canvas.put(1, 0, 'a');
        assert!(matches!(
            ctx.rotate_copy(3),
            Err(Error::UnsupportedRotation(3))
        ));
    }

    #[test]
    fn rotate_overlap_prefers_existing_glyphs() {
        let mut ctx = Context::new();
        ctx.canvas.put(1, 0, 'a');
        ctx.canvas.put(0, 1, 'k');
        ctx.rotate_overlap(2).unwrap();
        // (1,0) rotates onto (0,1), which is already drawn: keep 'k'.
        assert_eq!(ctx.canvas.get(0, 1).unwrap().glyph, 'k');
    }

    #[test]
    fn reflect_copy_mirrors_about_the_cursor_axis() {
        let mut ctx = Context::new();
        ctx.canvas.put(2, 0, 'a');
        ctx.reflect_copy(&[Direction::Right]);
        assert_eq!(ctx.canvas.get(2, 0).unwrap().glyph, 'a');
        assert_eq!(ctx.canvas.get(-2, 0).unwrap().glyph, 'a');
    }

    #[test]
    fn reflect_in_place_flips_within_bounds() {
        let mut ctx = Context::new();
        ctx.print_value(&Value::text("ab"), Some(&[Direction::Right]), false)
            .unwrap();
        ctx.reflect(Direction::Right);
        assert_eq!(ctx.canvas.render(' '), "ba");
    }

    #[test]
    fn polygon_square_closes_and_fills() {
        let mut ctx = Context::new();
        ctx.polygon(
            &[
                (Direction::Right, 3),
                (Direction::Down, 3),
                (Direction::Left, 3),
                (Direction::Up, 3),
            ],
            "#",
            true,
        );
        assert_eq!(ctx.canvas.render(' '), "###\n###\n###");
        assert_eq!(ctx.cursor(), (0, 0));
    }

    #[test]
    fn hollow_polygon_draws_only_the_border() {
        let mut ctx = Context::new();
        ctx.polygon(
            &[
                (Direction::Right, 3),
                (Direction::Down, 3),
                (Direction::Left, 3),
                (Direction::Up, 3),
            ],
            "#",
            false,
        );
        assert_eq!(ctx.canvas.render(' '), "###\n# #\n###");
    }

    #[test]
    fn fill_floods_the_enclosed_region() {
        let mut ctx = Context::new();
        ctx.polygon(
            &[
                (Direction::Right, 4),
                (Direction::Down, 4),
                (Direction::Left, 4),
                (Direction::Up, 4),
            ],
            "#",
            false,
        );
        ctx.jump(1, 1);
        ctx.fill("*");
        assert_eq!(ctx.canvas.render(' '), "####\n#**#\n#**#\n####");
    }

    #[test]
    fn trim_keeps_the_window_at_the_cursor() {
        let mut ctx = Context::new();
        ctx.print_value(&Value::text("abcd"), Some(&[Direction::Right]), false)
            .unwrap();
        ctx.jump(1, 0);
        ctx.trim(2, 1);
        assert_eq!(ctx.canvas.render(' '), "bc");
    }

    #[test]
    fn extend_spreads_columns() {
        let mut ctx = Context::new();
        ctx.print_value(&Value::text("ab"), Some(&[Direction::Right]), false)
            .unwrap();
        ctx.extend(1, 0);
        assert_eq!(ctx.canvas.render(' '), "a b");
    }

    #[test]
    fn scope_shadowing_and_assignment() {
        let mut ctx = Context::new();
        ctx.assign('κ', Value::Num(1));
        ctx.push_scope();
        assert_eq!(ctx.lookup('κ'), Value::Num(1));
        ctx.assign('κ', Value::Num(2));
        ctx.pop_scope();
        // Assignment rebinds the existing outer binding.
        assert_eq!(ctx.lookup('κ'), Value::Num(2));
        assert_eq!(ctx.lookup('ω'), Value::Null);
    }

    #[test]
    fn hidden_scope_provides_presets() {
        let ctx = Context::new();
        assert_eq!(
            ctx.lookup('β'),
            Value::text("abcdefghijklmnopqrstuvwxyz")
        );
    }

    #[test]
    fn input_queue_is_ordered_and_finite() {
        let mut ctx = Context::new();
        ctx.queue_input("first");
        ctx.queue_input("17");
        assert_eq!(ctx.input_string().unwrap(), Value::text("first"));
        assert_eq!(ctx.input_number().unwrap(), Value::Num(17));
        assert!(matches!(ctx.input_string(), Err(Error::EndOfInput)));
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let mut a = Context::with_seed(7);
        let mut b = Context::with_seed(7);
        assert_eq!(
            a.random_bounded(&Value::Num(1000)).unwrap(),
            b.random_bounded(&Value::Num(1000)).unwrap()
        );
    }
}
