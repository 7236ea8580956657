//! Source rewriting for statement coverage.
//!
//! Instrumentation is two passes over the arena. The first collects every
//! coverable statement in document order into a manifest of line numbers,
//! duplicates and all, so the runtime knows up front which lines the file can
//! hit. The second splices a recorder call against each target: expression
//! statements and returns wrap their expression in a parenthesized sequence
//! so control flow cannot skip the probe, while variable declarations take a
//! probe statement immediately before them (their initializers are the only
//! place a sequence could go, and that would change `var` hoisting scope).

use crate::ast::kind::NodeKind;
use crate::ast::{Ast, NodeId};
use crate::emit::escape;
use crate::emit::render;
use crate::err::{CoverError, CoverResult};
use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Identifier the injected header binds the recorder to. Deliberately odd so
/// that collisions with user code are implausible and re-instrumentation can
/// recognize its own probes.
pub const RECORDER_BINDING: &str = "__$c";

#[derive(Clone, Debug)]
pub struct InstrumentOptions {
  /// Module specifier the injected header imports the recorder from.
  pub runtime_module: String,
  /// Directory instrumented files are mirrored into by [write_instrumented].
  pub out_dir: PathBuf,
}

impl Default for InstrumentOptions {
  fn default() -> InstrumentOptions {
    InstrumentOptions {
      runtime_module: "cover-js/runtime".to_string(),
      out_dir: PathBuf::from("coverage"),
    }
  }
}

enum Edit {
  /// Wrap this expression in `(probe, expression)`.
  Wrap(NodeId),
  /// Insert a probe statement before this node.
  Before(NodeId),
  Skip,
}

/// Rewrites `source` into its instrumented form. `file` is the name recorded
/// in probes and the coverage manifest, verbatim.
///
/// # Examples
///
/// ```
/// use cover_js::{instrument, InstrumentOptions};
/// use std::path::Path;
///
/// let out = instrument("f();", Path::new("app.js"), &InstrumentOptions::default()).unwrap();
/// assert!(out.starts_with("import{cover as __$c}from'cover-js/runtime';\n"));
/// assert!(out.contains("__$c.init('app.js',[1]);"));
/// assert!(out.ends_with("(__$c.statement('app.js',1),f());\n"));
/// ```
pub fn instrument(source: &str, file: &Path, options: &InstrumentOptions) -> CoverResult<String> {
  let mut ast = Ast::parse(source)?;
  let file_lit = escape::single_quoted(&file.to_string_lossy());

  let mut targets = Vec::new();
  ast.visit(ast.root(), &mut |id| {
    if ast.instrumented(id) {
      targets.push(id);
    }
  });

  let manifest = targets
    .iter()
    .map(|&id| ast.line(id).to_string())
    .collect::<Vec<_>>()
    .join(", ");
  let module_lit = escape::single_quoted(&options.runtime_module);
  let header = format!(
    "import {{cover as {RECORDER_BINDING}}} from {module_lit};\n{RECORDER_BINDING}.init({file_lit}, [{manifest}]);"
  );
  let header_stmts = ast.parse_fragment(&header)?;
  ast.prepend(ast.root(), header_stmts)?;

  for target in targets {
    let edit = match ast.kind(target) {
      NodeKind::ExpressionStatement { expression } => {
        if is_recorder_call(&ast, *expression) {
          // Already-instrumented input: leave our own calls alone.
          Edit::Skip
        } else {
          Edit::Wrap(*expression)
        }
      }
      NodeKind::ReturnStatement {
        argument: Some(argument),
      } => Edit::Wrap(*argument),
      NodeKind::ReturnStatement { argument: None } => Edit::Before(target),
      NodeKind::VariableDeclaration { .. } => {
        // A declaration in a `for` head or behind `export` cannot take a
        // preceding sibling; the probe lands before the whole construct.
        let anchor = match ast.parent(target) {
          Some(parent)
            if matches!(
              ast.kind(parent),
              NodeKind::ExportNamedDeclaration { .. }
                | NodeKind::ForOfStatement { .. }
                | NodeKind::ForStatement { .. }
            ) =>
          {
            parent
          }
          _ => target,
        };
        Edit::Before(anchor)
      }
      _ => Edit::Skip,
    };
    match edit {
      Edit::Wrap(expression) => {
        let line = ast.line(target);
        let probe = probe_expr(&mut ast, &file_lit, line)?;
        let loc = ast.loc(expression);
        let seq = ast.alloc(loc, line, NodeKind::SequenceExpression {
          parenthesized: true,
          expressions: vec![probe, expression],
        });
        // The old parent link of `expression` locates the slot, so splice
        // first and fix up child links after.
        ast.replace_with(expression, vec![seq])?;
        ast.adopt_children(seq);
      }
      Edit::Before(anchor) => {
        let line = ast.line(target);
        let probe = probe_stmt(&mut ast, &file_lit, line)?;
        ast.insert_before(anchor, vec![probe])?;
      }
      Edit::Skip => {}
    };
  }

  render(&ast)
}

/// Reads, instruments, and returns the rewritten source of one file.
pub fn instrument_file(path: &Path, options: &InstrumentOptions) -> CoverResult<String> {
  let source = fs::read_to_string(path)?;
  instrument(&source, path, options)
}

/// Instruments `path` and mirrors the output under the configured output
/// directory, creating intermediate directories as needed. Returns the path
/// written.
pub fn write_instrumented(path: &Path, options: &InstrumentOptions) -> CoverResult<PathBuf> {
  let output = instrument_file(path, options)?;
  // Keep the mirror inside out_dir even for absolute or `..` inputs.
  let relative = path
    .components()
    .filter(|c| matches!(c, Component::Normal(_)))
    .collect::<PathBuf>();
  let dest = options.out_dir.join(relative);
  if let Some(parent) = dest.parent() {
    fs::create_dir_all(parent)?;
  };
  fs::write(&dest, output)?;
  Ok(dest)
}

/// Local modules imported at the top level of `source`, resolved against the
/// importing file's directory, in declaration order. Bare specifiers are
/// package imports and are skipped; extensionless specifiers get
/// `default_ext`.
pub fn import_targets(source: &str, file: &Path, default_ext: &str) -> CoverResult<Vec<PathBuf>> {
  let ast = Ast::parse(source)?;
  let NodeKind::Program { body } = ast.kind(ast.root()) else {
    return Ok(Vec::new());
  };
  let base = file.parent().unwrap_or_else(|| Path::new(""));
  let mut targets = Vec::new();
  for stmt in body {
    if let NodeKind::ImportDeclaration { source, .. } = ast.kind(*stmt) {
      if !source.starts_with('.') {
        continue;
      };
      let mut path = base.join(source);
      if path.extension().is_none() {
        path.set_extension(default_ext);
      };
      targets.push(path);
    };
  }
  Ok(targets)
}

fn probe_stmt(ast: &mut Ast, file_lit: &str, line: u32) -> CoverResult<NodeId> {
  let source = format!("{RECORDER_BINDING}.statement({file_lit}, {line});");
  let ids = ast.parse_fragment(&source)?;
  let &[stmt] = ids.as_slice() else {
    return Err(CoverError::Render("probe fragment"));
  };
  Ok(stmt)
}

fn probe_expr(ast: &mut Ast, file_lit: &str, line: u32) -> CoverResult<NodeId> {
  let stmt = probe_stmt(ast, file_lit, line)?;
  match ast.kind(stmt) {
    NodeKind::ExpressionStatement { expression } => Ok(*expression),
    _ => Err(CoverError::Render("probe fragment")),
  }
}

// True for calls whose callee chain bottoms out at the recorder binding.
fn is_recorder_call(ast: &Ast, id: NodeId) -> bool {
  let NodeKind::CallExpression { callee, .. } = ast.kind(id) else {
    return false;
  };
  let mut cur = *callee;
  loop {
    match ast.kind(cur) {
      NodeKind::ComputedMemberExpression { object, .. } => cur = *object,
      NodeKind::MemberExpression { object, .. } => cur = *object,
      NodeKind::Identifier { name } => return name == RECORDER_BINDING,
      _ => return false,
    };
  }
}
