use fp_core::ast::{
    Decl, Expr, ExprKind, File, GenKind, NodeIdGen, Spec, Stmt, TypeExprKind,
};
use fp_core::span::FileId;
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::Lowerer;
use crate::parser::parse_source;

fn lower(source: &str) -> File {
    let tree = parse_source(source);
    let mut ids = NodeIdGen::new();
    Lowerer::new(FileId(0), &mut ids)
        .lower_file(&tree.root())
        .expect("file has a package clause")
}

fn func_body(file: &File, name: &str) -> Vec<Stmt> {
    file.decls
        .iter()
        .find_map(|d| match d {
            Decl::Func(f) if f.name.name == name => f.body.as_ref().map(|b| b.stmts.clone()),
            _ => None,
        })
        .expect("function with a body")
}

fn first_expr(stmts: &[Stmt]) -> &Expr {
    stmts
        .iter()
        .find_map(|s| match s {
            Stmt::Expr(e) => Some(e),
            _ => None,
        })
        .expect("expression statement")
}

#[test]
fn missing_package_clause_yields_none() {
    let tree = parse_source("func f() {}\n");
    let mut ids = NodeIdGen::new();
    assert!(Lowerer::new(FileId(0), &mut ids).lower_file(&tree.root()).is_none());
}

#[test]
fn top_level_declarations_in_order() {
    let file = lower(
        r#"package inventory

import "fmt"

type item struct{ sku string }

var (
    count int
    names []string
)

const limit = 10

func Print() { fmt.Println(limit) }

func (i *item) label() string { return i.sku }
"#,
    );
    assert_eq!(file.package, "inventory");
    let kinds: Vec<&str> = file
        .decls
        .iter()
        .map(|d| match d {
            Decl::Func(f) if f.is_method() => "method",
            Decl::Func(_) => "func",
            Decl::Gen(g) => match g.kind {
                GenKind::Type => "type",
                GenKind::Var => "var",
                GenKind::Const => "const",
            },
        })
        .collect();
    assert_eq!(kinds, vec!["type", "var", "const", "func", "method"]);

    let Decl::Gen(vars) = &file.decls[1] else {
        panic!("expected var group");
    };
    assert_eq!(vars.specs.len(), 2);
}

#[test]
fn method_receiver_is_lowered() {
    let file = lower("package p\n\ntype t struct{}\n\nfunc (r *t) m() {}\n");
    let Decl::Func(method) = &file.decls[1] else {
        panic!("expected method");
    };
    let receiver = method.receiver.as_ref().expect("receiver");
    assert_eq!(receiver.names[0].name, "r");
    let TypeExprKind::Pointer(inner) = &receiver.ty.kind else {
        panic!("expected pointer receiver, got {:?}", receiver.ty.kind);
    };
    assert!(matches!(&inner.kind, TypeExprKind::Name(n) if n == "t"));
}

#[test]
fn struct_fields_and_embedding() {
    let file = lower("package p\n\ntype s struct {\n\ta, b int\n\tbase\n\t*other\n\tName string\n}\n");
    let Decl::Gen(decl) = &file.decls[0] else {
        panic!("expected type decl");
    };
    let Spec::Type(spec) = &decl.specs[0] else {
        panic!("expected type spec");
    };
    let TypeExprKind::Struct(fields) = &spec.ty.kind else {
        panic!("expected struct");
    };
    assert_eq!(fields.len(), 4);
    assert_eq!(
        fields[0].names.iter().map(|n| n.name.as_str()).collect::<Vec<_>>(),
        vec!["a", "b"]
    );
    assert!(fields[1].embedded);
    assert!(fields[2].embedded);
    assert!(matches!(fields[2].ty.kind, TypeExprKind::Pointer(_)));
    assert!(!fields[3].embedded);
}

#[test]
fn selector_member_keeps_its_own_span() {
    let source = "package p\n\nfunc f() { v.name }\n";
    let file = lower(source);
    let body = func_body(&file, "f");
    let ExprKind::Selector { operand, member } = &first_expr(&body).kind else {
        panic!("expected selector");
    };
    assert!(matches!(&operand.kind, ExprKind::Ident(n) if n == "v"));
    assert_eq!(member.name, "name");
    let start = member.span.start as usize;
    let end = member.span.end as usize;
    assert_eq!(&source[start..end], "name");
}

#[rstest]
#[case("t{a: 1, b: 2}", vec![Some("a"), Some("b")])]
#[case("t{1, 2, 3}", vec![None, None, None])]
#[case("[]t{{x: 1}, {}}", vec![None, None])]
fn composite_elements(#[case] literal: &str, #[case] keys: Vec<Option<&str>>) {
    let file = lower(&format!("package p\n\nfunc f() {{ _ = {literal} }}\n"));
    let body = func_body(&file, "f");
    let Stmt::Assign { rhs, .. } = &body[0] else {
        panic!("expected assignment, got {:?}", body[0]);
    };
    let ExprKind::Composite { ty, elements } = &rhs[0].kind else {
        panic!("expected composite literal");
    };
    assert!(ty.is_some());
    let got: Vec<Option<&str>> = elements.iter().map(|e| e.key_name()).collect();
    assert_eq!(got, keys);
}

#[test]
fn elided_inner_literals_have_no_type() {
    let file = lower("package p\n\nfunc f() { _ = []t{{x: 1}} }\n");
    let body = func_body(&file, "f");
    let Stmt::Assign { rhs, .. } = &body[0] else {
        panic!("expected assignment");
    };
    let ExprKind::Composite { elements, .. } = &rhs[0].kind else {
        panic!("expected composite literal");
    };
    let ExprKind::Composite { ty, elements: inner } = &elements[0].value.kind else {
        panic!("expected elided literal, got {:?}", elements[0].value.kind);
    };
    assert!(ty.is_none());
    assert_eq!(inner[0].key_name(), Some("x"));
}

#[test]
fn func_literal_bodies_are_kept() {
    let file = lower("package p\n\nfunc f() {\n\tg := func() { v.x }\n\tg()\n}\n");
    let body = func_body(&file, "f");
    let Stmt::Define { names, values } = &body[0] else {
        panic!("expected short var declaration");
    };
    assert_eq!(names[0].name, "g");
    let ExprKind::FuncLit(lit) = &values[0].kind else {
        panic!("expected func literal");
    };
    assert!(matches!(
        first_expr(&lit.body.stmts).kind,
        ExprKind::Selector { .. }
    ));
}

#[test]
fn compound_statements_keep_headers_and_bodies() {
    let file = lower(
        "package p\n\nfunc f() {\n\tif v := load(); v.ok {\n\t\tuse(v.x)\n\t}\n\tfor k, v := range m {\n\t\t_ = v.y\n\t\t_ = k\n\t}\n}\n",
    );
    let body = func_body(&file, "f");
    assert_eq!(body.len(), 2);
    let Stmt::Block(if_block) = &body[0] else {
        panic!("expected if statement block");
    };
    assert!(matches!(if_block.stmts[0], Stmt::Define { .. }));
    let Stmt::Range(range) = &body[1] else {
        panic!("expected range statement");
    };
    assert!(range.define);
    assert!(range.key.is_some());
    assert!(range.value.is_some());
    assert_eq!(range.body.stmts.len(), 2);
}

#[test]
fn node_ids_are_unique_across_files() {
    let mut ids = NodeIdGen::new();
    let a = parse_source("package p\n\nvar a = x.y\n");
    let b = parse_source("package p\n\nvar b = x.y\n");
    let fa = Lowerer::new(FileId(0), &mut ids).lower_file(&a.root()).expect("a");
    let fb = Lowerer::new(FileId(1), &mut ids).lower_file(&b.root()).expect("b");
    let value_id = |f: &File| match &f.decls[0] {
        Decl::Gen(g) => match &g.specs[0] {
            Spec::Value(v) => v.values[0].id,
            Spec::Type(_) => panic!("expected value spec"),
        },
        Decl::Func(_) => panic!("expected gen decl"),
    };
    assert_ne!(value_id(&fa), value_id(&fb));
}

#[test]
fn type_switch_keeps_alias_and_clause_types() {
    let file = lower(
        "package p\n\nfunc f(x any) {\n\tswitch v := x.(type) {\n\tcase string, item:\n\t\t_ = v\n\tcase *item:\n\t\t_ = v.sku\n\tdefault:\n\t}\n}\n",
    );
    let body = func_body(&file, "f");
    let Stmt::TypeSwitch(switch) = &body[0] else {
        panic!("expected type switch");
    };
    assert_eq!(switch.alias.as_ref().map(|a| a.name.as_str()), Some("v"));
    assert!(matches!(&switch.operand.kind, ExprKind::Ident(name) if name == "x"));
    assert_eq!(switch.cases.len(), 3);
    assert_eq!(switch.cases[0].types.len(), 2);
    assert!(switch.cases[0].single_type().is_none());
    assert!(matches!(
        switch.cases[1].single_type().map(|t| &t.kind),
        Some(TypeExprKind::Pointer(_))
    ));
    assert!(switch.cases[2].types.is_empty());
    assert_eq!(switch.cases[1].body.stmts.len(), 1);
}

#[test]
fn select_receive_defines_its_targets() {
    let file = lower(
        "package p\n\nfunc f(ch chan int) {\n\tselect {\n\tcase n, ok := <-ch:\n\t\t_ = n\n\t\t_ = ok\n\t}\n}\n",
    );
    let body = func_body(&file, "f");
    let Stmt::Block(select) = &body[0] else {
        panic!("expected select block");
    };
    let Stmt::Block(case) = &select.stmts[0] else {
        panic!("expected communication clause");
    };
    let Stmt::Define { names, values } = &case.stmts[0] else {
        panic!("expected receive definition");
    };
    let names: Vec<&str> = names.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["n", "ok"]);
    assert!(matches!(&values[0].kind, ExprKind::Unary { op, .. } if op == "<-"));
    assert_eq!(case.stmts.len(), 3);
}
