use super::expr::pat::is_valid_pattern_identifier;
use super::expr::Asi;
use super::ParseCtx;
use super::Parser;
use crate::ast::expr::pat::IdPat;
use crate::ast::import_export::ExportName;
use crate::ast::import_export::ExportNames;
use crate::ast::import_export::ImportName;
use crate::ast::import_export::ImportNames;
use crate::ast::node::Node;
use crate::ast::stmt::decl::PatDecl;
use crate::ast::stmt::ExportDefaultExprStmt;
use crate::ast::stmt::ExportListStmt;
use crate::ast::stmt::ImportStmt;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::KEYWORDS_MAPPING;
use crate::parse::stmt::decl::VarDeclParseMode;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Parses `target` or `target as alias`.
  ///
  /// The target may be any keyword (e.g. `import {default as a}`,
  /// `export {a as default}`), but a reserved word requires an alias whenever
  /// the name would otherwise become a local binding.
  fn import_or_export_name(
    &mut self,
    ctx: ParseCtx,
    is_export: bool,
  ) -> SyntaxResult<(String, Node<IdPat>)> {
    let t0 = self.peek();
    #[rustfmt::skip]
    let (target, alias_is_required) = match t0.typ {
      t if is_valid_pattern_identifier(t, ctx.rules) => (self.consume_as_string(), false),
      // `default` is special: in exports it can be used without an alias, but in imports it requires one.
      TT::KeywordDefault if is_export => (self.consume_as_string(), false),
      // Any other keyword is allowed, but if reserved, an alias must be used.
      t if KEYWORDS_MAPPING.contains_key(&t) => (self.consume_as_string(), true),
      _ => return Err(t0.error(SyntaxErrorType::ExpectedSyntax("identifier"))),
    };
    let alias = if self.consume_if(TT::KeywordAs).is_match() {
      let t_alias = self.peek();
      if is_export && KEYWORDS_MAPPING.contains_key(&t_alias.typ) {
        // Exported names are `IdentifierName`s, so keywords like `default` are allowed.
        self.consume();
        Node::new(t_alias.loc, IdPat {
          name: self.string(t_alias.loc),
        })
      } else {
        self.id_pat(ctx)?
      }
    } else if alias_is_required {
      // A shorthand specifier with a reserved word would create an invalid local binding (e.g. `import {default}` or `import {while}`).
      return Err(t0.error(SyntaxErrorType::ExpectedSyntax("identifier")));
    } else {
      // Create a "virtual" node representing the alias as if `a as a` was declared instead. (See AST for rationale.)
      Node::new(t0.loc, IdPat {
        name: target.clone(),
      })
    };
    Ok((target, alias))
  }

  /// Parses an import statement like:
  /// - `import "module"`
  /// - `import * as b from "module"`
  /// - `import {b as c, d, e as f, default as g} from "module"`
  /// - `import a from "module"`
  /// - `import a, * as b from "module"`
  /// - `import a, {b as c, d, e as f, default as g} from "module"`
  pub fn import_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ImportStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordImport)?;
      let (default, can_have_names) = if is_valid_pattern_identifier(p.peek().typ, ctx.rules) {
        let alias = p.id_pat_decl(ctx)?;
        (Some(alias), p.consume_if(TT::Comma).is_match())
      } else {
        (None, true)
      };
      let names = if !can_have_names {
        None
      } else if p.consume_if(TT::Asterisk).is_match() {
        p.require(TT::KeywordAs)?;
        let alias = p.id_pat_decl(ctx)?;
        Some(ImportNames::All(alias))
      } else if p.peek().typ == TT::BraceOpen {
        p.require(TT::BraceOpen)?;
        let names = p.list_with_loc(TT::Comma, TT::BraceClose, |p| {
          let (target, alias) = p.import_or_export_name(ctx, false)?;
          let alias = alias.into_wrapped().wrap(|pat| PatDecl { pat });
          Ok(ImportName {
            importable: target,
            alias,
          })
        })?;
        Some(ImportNames::Specific(names))
      } else {
        // No names, so this is a side effect only import like `import "foo"`.
        None
      };
      // Side effect imports have no `from` clause.
      if default.is_some() || names.is_some() {
        p.require(TT::KeywordFrom)?;
      }
      let module = p.lit_str_val()?;
      // The semicolon is optional at EOF or before a line terminator.
      let t = p.peek();
      if t.typ != TT::EOF && !t.preceded_by_line_terminator {
        p.require(TT::Semicolon)?;
      } else {
        let _ = p.consume_if(TT::Semicolon);
      }
      Ok(ImportStmt {
        default,
        names,
        module,
      })
    })
  }

  pub fn export_list_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ExportListStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordExport)?;
      let t = p.consume();
      let (names, from) = match t.typ {
        TT::BraceOpen => {
          let names = p.list_with_loc(TT::Comma, TT::BraceClose, |p| {
            let (target, alias) = p.import_or_export_name(ctx, true)?;
            Ok(ExportName {
              exportable: target,
              alias,
            })
          })?;
          let from = if p.consume_if(TT::KeywordFrom).is_match() {
            Some(p.lit_str_val()?)
          } else {
            None
          };
          (ExportNames::Specific(names), from)
        }
        TT::Asterisk => {
          let alias = p.consume_if(TT::KeywordAs).and_then(|| {
            let t = p.peek();
            if KEYWORDS_MAPPING.contains_key(&t.typ) {
              // Exported names are `IdentifierName`s, so keywords are allowed.
              p.consume();
              Ok(Node::new(t.loc, IdPat {
                name: p.string(t.loc),
              }))
            } else {
              p.id_pat(ctx)
            }
          })?;
          p.require(TT::KeywordFrom)?;
          let from = p.lit_str_val()?;
          (ExportNames::All(alias), Some(from))
        }
        _ => return Err(t.error(SyntaxErrorType::ExpectedNotFound)),
      };
      Ok(ExportListStmt { names, from })
    })
  }

  pub fn export_default_expr_stmt(
    &mut self,
    ctx: ParseCtx,
  ) -> SyntaxResult<Node<ExportDefaultExprStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordExport)?;
      p.require(TT::KeywordDefault)?;
      let mut asi = Asi::can();
      let expression = p.expr_with_asi(ctx, [TT::Semicolon], &mut asi)?;
      Ok(ExportDefaultExprStmt { expression })
    })
  }

  // https://tc39.es/ecma262/#sec-exports
  // https://jakearchibald.com/2021/export-default-thing-vs-thing-as-default/
  pub fn export_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    let [t0, t1, t2] = self.peek_n();
    // The first token should always be `export`, but it will be parsed in the subroutines and not here.
    assert_eq!(t0.typ, TT::KeywordExport);
    #[rustfmt::skip]
    let stmt: Node<Stmt> = match (t1.typ, t2.typ) {
      // `class` and `function` are treated as statements that are hoisted, not expressions; however, they can be unnamed, which gives them the name `default`.
      (TT::KeywordDefault, TT::KeywordAsync | TT::KeywordFunction) | (TT::KeywordAsync | TT::KeywordFunction, _) => self.func_decl(ctx)?.into_wrapped(),
      (TT::KeywordDefault, TT::KeywordClass) | (TT::KeywordClass, _) => self.class_decl(ctx)?.into_wrapped(),
      (TT::KeywordDefault, _) => self.export_default_expr_stmt(ctx)?.into_wrapped(),
      (TT::KeywordVar | TT::KeywordLet | TT::KeywordConst, _) => self.var_decl(ctx, VarDeclParseMode::Asi)?.into_wrapped(),
      (TT::BraceOpen | TT::Asterisk, _) => self.export_list_stmt(ctx)?.into_wrapped(),
      _ => return Err(t0.error(SyntaxErrorType::ExpectedSyntax("exportable"))),
    };
    // An explicit terminating semicolon belongs to the export declaration, not an empty statement.
    let _ = self.consume_if(TT::Semicolon);
    Ok(stmt)
  }
}
