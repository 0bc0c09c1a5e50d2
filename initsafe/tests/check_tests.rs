use initsafe::{
    common::{Ident, Span},
    error::InitErrorKind,
    tree::{
        symbol::SymbolOwner,
        tree_nodes::Arg,
        types::{Type, TypeRef},
        ClassId, ClassOwner, ExprId, ProgramBuilder, SymbolId,
    },
    CheckConfig,
};
use pretty_assertions::assert_eq;

mod common;
use common::{check_class, check_program, error_kinds};

/// Checks that the errors match the patterns, in order
macro_rules! expect_errors {
    ($output:expr, $config:expr, [$($error:pat $(if $guard:expr)?),* $(,)?]) => {{
        let output = &$output;
        let expected: &[&str] = &[$(stringify!($error)),*];
        let rendered = output.format(&$config.compile_context);
        if output.errors.len() != expected.len() {
            panic!("Expected {:?} but got:\n{}", expected, rendered);
        }
        #[allow(unused_mut, unused_variables)]
        let mut errors = output.errors.iter();
        $(
            let error = errors.next().unwrap();
            if !matches!(&error.kind, $error $(if $guard)?) {
                panic!("Expected {} but got:\n{}", stringify!($error), rendered);
            }
        )*
    }};
}

macro_rules! expect_ok {
    ($output:expr, $config:expr) => {
        expect_errors!($output, $config, [])
    };
}

/// `object Helper { def consume(value) = 1 }`, calling it requires a fully initialized argument
fn add_helper(builder: &mut ProgramBuilder) -> (ClassId, SymbolId) {
    let helper = builder.add_object("Helper", ClassOwner::Package);
    let consume = builder.add_method(helper, "consume", &["value"]);
    let body = builder.literal();
    builder.set_body(consume, body);
    (helper, consume)
}

/// `Helper.consume(arg)`
fn consume(builder: &mut ProgramBuilder, helper: (ClassId, SymbolId), arg: ExprId) -> ExprId {
    let qualifier = builder.this(helper.0);
    builder.call(qualifier, helper.1, &[Arg::new(arg)])
}

fn set_literal(builder: &mut ProgramBuilder, symbol: SymbolId) {
    let literal = builder.literal();
    builder.set_body(symbol, literal);
}

#[test]
fn test_parent_fields_are_initialized_first() {
    // class A(x) { val a = x }
    // class B extends A(1) { val b = a }
    let mut builder = ProgramBuilder::new();
    let a = builder.add_class("A", ClassOwner::Package);
    let x = builder.add_class_param(a, "x");
    let field_a = builder.add_field(a, "a");
    let x_ref = builder.ident(x);
    builder.set_body(field_a, x_ref);

    let b = builder.add_class("B", ClassOwner::Package);
    let one = builder.literal();
    builder.extend(b, a, &[Arg::new(one)]);
    let field_b = builder.add_field(b, "b");
    let a_ref = builder.this_ident(b, field_a);
    builder.set_body(field_b, a_ref);

    let (output, config) = check_class(builder, b);
    expect_ok!(output, config);
}

#[test]
fn test_access_before_initialization() {
    // class A { val a = b; val b = a; val x = l; lazy val l = late; val late = 1 }
    let mut builder = ProgramBuilder::new();
    let class = builder.add_class("A", ClassOwner::Package);
    let a = builder.add_field(class, "a");
    let b = builder.add_field(class, "b");
    let x = builder.add_field(class, "x");
    let l = builder.add_lazy_field(class, "l");
    let late = builder.add_field(class, "late");
    for (field, rhs) in [(a, b), (b, a), (x, l), (l, late)] {
        let rhs = builder.ident(rhs);
        builder.set_body(field, rhs);
    }
    set_literal(&mut builder, late);

    let (output, config) = check_class(builder, class);
    assert_eq!(
        error_kinds(&output),
        vec![
            InitErrorKind::AccessNonInit {
                field: Ident::new("b")
            },
            InitErrorKind::AccessNonInit {
                field: Ident::new("late")
            },
        ]
    );
    expect_errors!(
        output,
        config,
        [
            InitErrorKind::AccessNonInit { .. },
            InitErrorKind::AccessNonInit { .. }
        ]
    );
}

#[test]
fn test_mutually_recursive_lazy_values() {
    // class A { lazy val a = b; lazy val b = a; val c = a }
    let mut builder = ProgramBuilder::new();
    let class = builder.add_class("A", ClassOwner::Package);
    let a = builder.add_lazy_field(class, "a");
    let b = builder.add_lazy_field(class, "b");
    let c = builder.add_field(class, "c");
    for (field, rhs) in [(a, b), (b, a), (c, a)] {
        let rhs = builder.ident(rhs);
        builder.set_body(field, rhs);
    }

    let (output, config) = check_class(builder, class);
    expect_ok!(output, config);
}

#[test]
fn test_leak_through_stored_this() {
    // class A {
    //   val self = this
    //   class B { val y = self.z }
    //   val b = new B
    //   val z = 1
    // }
    let mut builder = ProgramBuilder::new();
    let a = builder.add_class("A", ClassOwner::Package);
    let self_field = builder.add_field(a, "self");
    let this = builder.this(a);
    builder.set_body(self_field, this);

    let b = builder.add_class("B", ClassOwner::Class(a));
    let y = builder.add_field(b, "y");
    let b_field = builder.add_field(a, "b");
    let z = builder.add_field(a, "z");
    set_literal(&mut builder, z);

    let self_ref = builder.ident(self_field);
    let select = builder.select(self_ref, z);
    builder.set_body(y, select);
    let new_b = builder.new_instance(b, &[]);
    builder.set_body(b_field, new_b);

    // Checking `B` on its own is fine, its outer is unknown and therefore initialized
    let (output, config) = check_program(builder);
    expect_errors!(
        output,
        config,
        [InitErrorKind::AccessNonInit { field } if *field == "z"]
    );
}

#[test]
fn test_this_escapes_as_argument() {
    // class A { val x = Helper.consume(this); val late = 1 }
    let mut builder = ProgramBuilder::new();
    let helper = add_helper(&mut builder);
    let class = builder.add_class("A", ClassOwner::Package);
    let x = builder.add_field(class, "x");
    let late = builder.add_field(class, "late");
    set_literal(&mut builder, late);
    let this = builder.this(class);
    let call = consume(&mut builder, helper, this);
    builder.set_body(x, call);

    let (output, config) = check_class(builder, class);
    expect_errors!(
        output,
        config,
        [InitErrorKind::PromoteError { msg } if msg.contains("arguments")]
    );
}

#[test]
fn test_this_is_promoted_after_every_field_is_initialized() {
    // class A { val a = 1; Helper.consume(this) }
    let mut builder = ProgramBuilder::new();
    let helper = add_helper(&mut builder);
    let class = builder.add_class("A", ClassOwner::Package);
    let a = builder.add_field(class, "a");
    set_literal(&mut builder, a);
    let this = builder.this(class);
    let call = consume(&mut builder, helper, this);
    builder.add_stat(class, call);

    let (output, config) = check_class(builder, class);
    expect_ok!(output, config);
}

#[test]
fn test_branches_are_joined() {
    // trait T { def f: Int }
    // class A {
    //   val v = if (cond) new B1 else new B2
    //   val r = v.f
    //   val late1 = 1
    //   val late2 = 2
    //   class B1 extends T { def f = late1 }
    //   class B2 extends T { def f = late2 }
    // }
    let mut builder = ProgramBuilder::new();
    let t = builder.add_trait("T", ClassOwner::Package);
    let abstract_f = builder.add_abstract_method(t, "f", &[]);

    let a = builder.add_class("A", ClassOwner::Package);
    let v = builder.add_field(a, "v");
    let r = builder.add_field(a, "r");
    let late1 = builder.add_field(a, "late1");
    let late2 = builder.add_field(a, "late2");
    set_literal(&mut builder, late1);
    set_literal(&mut builder, late2);

    let mut branches = Vec::new();
    for (name, late) in [("B1", late1), ("B2", late2)] {
        let class = builder.add_class(name, ClassOwner::Class(a));
        builder.extend(class, t, &[]);
        let f = builder.add_method(class, "f", &[]);
        let late_ref = builder.ident(late);
        builder.set_body(f, late_ref);
        branches.push(builder.new_instance(class, &[]));
    }

    let cond = builder.literal();
    let if_else = builder.if_else(cond, branches[0], branches[1]);
    builder.set_body(v, if_else);
    let v_ref = builder.ident(v);
    let call = builder.call(v_ref, abstract_f, &[]);
    builder.set_body(r, call);

    let (output, config) = check_class(builder, a);
    expect_errors!(
        output,
        config,
        [
            InitErrorKind::AccessNonInit { field } if *field == "late1",
            InitErrorKind::AccessNonInit { field } if *field == "late2",
        ]
    );
}

#[test]
fn test_unsafe_constructor_arguments() {
    // class A { val b = new B(this); def m = 1; val z = 1 }
    // class B(a) { val x = a.z; val y = a.m() }
    let mut builder = ProgramBuilder::new();
    let a = builder.add_class("A", ClassOwner::Package);
    let b_field = builder.add_field(a, "b");
    let m = builder.add_method(a, "m", &[]);
    let z = builder.add_field(a, "z");
    set_literal(&mut builder, m);
    set_literal(&mut builder, z);

    let b = builder.add_class("B", ClassOwner::Package);
    let param = builder.add_class_param(b, "a");
    let x = builder.add_field(b, "x");
    let y = builder.add_field(b, "y");
    let param_ref = builder.ident(param);
    let select = builder.select(param_ref, z);
    builder.set_body(x, select);
    let param_ref = builder.ident(param);
    let call = builder.call(param_ref, m, &[]);
    builder.set_body(y, call);

    let this = builder.this(a);
    let new_b = builder.new_instance(b, &[Arg::new(this)]);
    builder.set_body(b_field, new_b);

    let (output, config) = check_class(builder, a);
    expect_errors!(
        output,
        config,
        [
            InitErrorKind::PromoteError { .. },
            InitErrorKind::AccessCold { field } if *field == "z",
            InitErrorKind::CallCold { method } if *method == "m",
        ]
    );
}

#[test]
fn test_calls_without_source() {
    // class Ext { def m(): Int }    (from a library)
    // class A extends Ext { val x = this.m(); val s = this.toString() }
    let mut builder = ProgramBuilder::new();
    let ext = builder.add_extern_class("Ext");
    let m = builder.add_method(ext, "m", &[]);
    let to_string = builder.program().find_decl(builder.any_class(), "toString").unwrap();

    let a = builder.add_class("A", ClassOwner::Package);
    builder.extend(a, ext, &[]);
    let x = builder.add_field(a, "x");
    let s = builder.add_field(a, "s");
    let this = builder.this(a);
    let call = builder.call(this, m, &[]);
    builder.set_body(x, call);
    let this = builder.this(a);
    let call = builder.call(this, to_string, &[]);
    builder.set_body(s, call);

    let (output, config) = check_class(builder, a);
    expect_errors!(
        output,
        config,
        [InitErrorKind::CallUnknown { method } if *method == "m"]
    );
}

#[test]
fn test_secondary_constructor() {
    // class O {
    //   class I(x) { def this() = this(late); val y = x }
    //   val i = new I()
    //   val late = 1
    // }
    let mut builder = ProgramBuilder::new();
    let o = builder.add_class("O", ClassOwner::Package);
    let i = builder.add_class("I", ClassOwner::Class(o));
    let x = builder.add_class_param(i, "x");
    let y = builder.add_field(i, "y");
    let x_ref = builder.ident(x);
    builder.set_body(y, x_ref);
    let secondary = builder.add_secondary_constructor(i, &[]);

    let i_field = builder.add_field(o, "i");
    let late = builder.add_field(o, "late");
    set_literal(&mut builder, late);

    let primary = builder.program().class(i).primary_constructor.unwrap();
    let late_ref = builder.ident(late);
    let delegate = builder.this_constructor_call(i, primary, &[Arg::new(late_ref)]);
    builder.set_body(secondary, delegate);
    let new_i = builder.new_instance_with(
        TypeRef {
            prefix: Type::NoPrefix,
            class: i,
        },
        secondary,
        &[],
    );
    builder.set_body(i_field, new_i);

    let (output, config) = check_class(builder, o);
    expect_errors!(
        output,
        config,
        [InitErrorKind::AccessNonInit { field } if *field == "late"]
    );
}

#[test]
fn test_closure_call() {
    // class A { val f = () => late; val r = f(); val late = 1 }
    let mut builder = ProgramBuilder::new();
    let a = builder.add_class("A", ClassOwner::Package);
    let f = builder.add_field(a, "f");
    let r = builder.add_field(a, "r");
    let late = builder.add_field(a, "late");
    set_literal(&mut builder, late);

    let function = builder.add_anonymous_function(SymbolOwner::Symbol(f), &[]);
    let late_ref = builder.ident(late);
    let closure = builder.closure(function, late_ref);
    builder.set_body(f, closure);
    let f_ref = builder.ident(f);
    let apply = builder.function_apply();
    let call = builder.call(f_ref, apply, &[]);
    builder.set_body(r, call);

    let (output, config) = check_class(builder, a);
    expect_errors!(
        output,
        config,
        [InitErrorKind::AccessNonInit { field } if *field == "late"]
    );
}

#[test]
fn test_by_name_argument() {
    // class A { val x = m(late); def m(p: => Int) = 1; val late = 1 }
    let mut builder = ProgramBuilder::new();
    let a = builder.add_class("A", ClassOwner::Package);
    let x = builder.add_field(a, "x");
    let m = builder.add_method(a, "m", &["p"]);
    let late = builder.add_field(a, "late");
    set_literal(&mut builder, m);
    set_literal(&mut builder, late);

    let late_ref = builder.ident(late);
    let call = builder.call_ident(m, &[Arg::by_name(late_ref)]);
    builder.set_body(x, call);

    let (output, config) = check_class(builder, a);
    expect_errors!(
        output,
        config,
        [InitErrorKind::UnsafePromotion { causes, .. }
            if matches!(&causes[..], [cause] if matches!(&cause.kind, InitErrorKind::AccessNonInit { field } if *field == "late"))]
    );
    assert_eq!(output.errors.iter_flat().count(), 2);
}

#[test]
fn test_self_returning_closure_promotion() {
    // class A {
    //   val f = () => if (1) f else late
    //   Helper.consume(f)
    //   val late = 1
    // }
    fn build(read_late: bool) -> (ProgramBuilder, ClassId) {
        let mut builder = ProgramBuilder::new();
        let helper = add_helper(&mut builder);
        let a = builder.add_class("A", ClassOwner::Package);
        let f = builder.add_field(a, "f");
        let f_ref = builder.ident(f);
        let call = consume(&mut builder, helper, f_ref);
        builder.add_stat(a, call);
        let late = builder.add_field(a, "late");
        set_literal(&mut builder, late);

        let function = builder.add_anonymous_function(SymbolOwner::Symbol(f), &[]);
        let f_ref = builder.ident(f);
        let body = if read_late {
            let cond = builder.literal();
            let late_ref = builder.ident(late);
            builder.if_else(cond, f_ref, late_ref)
        } else {
            f_ref
        };
        let closure = builder.closure(function, body);
        builder.set_body(f, closure);
        (builder, a)
    }

    let (builder, a) = build(false);
    let (output, config) = check_class(builder, a);
    expect_ok!(output, config);

    let (builder, a) = build(true);
    let (output, config) = check_class(builder, a);
    expect_errors!(
        output,
        config,
        [InitErrorKind::UnsafePromotion { causes, .. }
            if matches!(&causes[..], [cause] if matches!(&cause.kind, InitErrorKind::AccessNonInit { field } if *field == "late"))]
    );
}

#[test]
fn test_warm_object_promotion() {
    // class A {
    //   val inner = new Inner
    //   Helper.consume(inner)
    //   val late = 2
    //   class Inner { def get = late }
    // }
    fn build(late_first: bool) -> (ProgramBuilder, ClassId) {
        let mut builder = ProgramBuilder::new();
        let helper = add_helper(&mut builder);
        let a = builder.add_class("A", ClassOwner::Package);
        let late = late_first.then(|| builder.add_field(a, "late"));
        let inner_field = builder.add_field(a, "inner");
        let inner_ref = builder.ident(inner_field);
        let call = consume(&mut builder, helper, inner_ref);
        builder.add_stat(a, call);
        let late = late.unwrap_or_else(|| builder.add_field(a, "late"));
        set_literal(&mut builder, late);

        let inner = builder.add_class("Inner", ClassOwner::Class(a));
        let get = builder.add_method(inner, "get", &[]);
        let late_ref = builder.ident(late);
        builder.set_body(get, late_ref);
        let new_inner = builder.new_instance(inner, &[]);
        builder.set_body(inner_field, new_inner);
        (builder, a)
    }

    let (builder, a) = build(false);
    let (output, config) = check_class(builder, a);
    expect_errors!(
        output,
        config,
        [InitErrorKind::UnsafePromotion { causes, .. }
            if matches!(&causes[..], [cause] if matches!(&cause.kind, InitErrorKind::AccessNonInit { field } if *field == "late"))]
    );

    let (builder, a) = build(true);
    let (output, config) = check_class(builder, a);
    expect_ok!(output, config);
}

#[test]
fn test_trait_initialization_order() {
    // trait T { val c: Int; val t = c }
    // class C extends T { val c = 1 }
    let mut builder = ProgramBuilder::new();
    let t = builder.add_trait("T", ClassOwner::Package);
    let abstract_c = builder.add_abstract_field(t, "c");
    let field_t = builder.add_field(t, "t");
    let c_ref = builder.ident(abstract_c);
    builder.set_body(field_t, c_ref);

    let c = builder.add_class("C", ClassOwner::Package);
    builder.extend(c, t, &[]);
    let field_c = builder.add_field(c, "c");
    set_literal(&mut builder, field_c);

    let (output, config) = check_program(builder);
    expect_errors!(
        output,
        config,
        [InitErrorKind::AccessNonInit { field } if *field == "c"]
    );
}

#[test]
fn test_trait_fields_are_visible_in_class_body() {
    // trait T { val t = 1 }
    // class C extends T { val c = t }
    let mut builder = ProgramBuilder::new();
    let t = builder.add_trait("T", ClassOwner::Package);
    let field_t = builder.add_field(t, "t");
    set_literal(&mut builder, field_t);

    let c = builder.add_class("C", ClassOwner::Package);
    builder.extend(c, t, &[]);
    let field_c = builder.add_field(c, "c");
    let t_ref = builder.this_ident(c, field_t);
    builder.set_body(field_c, t_ref);

    let (output, config) = check_class(builder, c);
    expect_ok!(output, config);
}

#[test]
fn test_super_call() {
    // class A { def f = 1 }
    // class B extends A { override def f = super.f; val x = f }
    let mut builder = ProgramBuilder::new();
    let a = builder.add_class("A", ClassOwner::Package);
    let f_a = builder.add_method(a, "f", &[]);
    set_literal(&mut builder, f_a);

    let b = builder.add_class("B", ClassOwner::Package);
    builder.extend(b, a, &[]);
    let f_b = builder.add_method(b, "f", &[]);
    let super_call = builder.super_call(b, a, f_a, &[]);
    builder.set_body(f_b, super_call);
    let x = builder.add_field(b, "x");
    let call = builder.call_ident(f_b, &[]);
    builder.set_body(x, call);

    let (output, config) = check_class(builder, b);
    expect_ok!(output, config);
}

#[test]
fn test_values_which_must_be_hot() {
    // class A {
    //   var v = 0
    //   v = this
    //   this match { case _ => }
    //   Seq(this)
    //   m()
    //   Helper.consume(this: @unchecked)
    //   def m() = return this
    //   val late = 1
    // }
    let mut builder = ProgramBuilder::new();
    let helper = add_helper(&mut builder);
    let a = builder.add_class("A", ClassOwner::Package);
    let v = builder.add_var(a, "v");
    set_literal(&mut builder, v);

    let v_ref = builder.ident(v);
    let this = builder.this(a);
    let assign = builder.assign(v_ref, this);
    builder.add_stat(a, assign);

    let this = builder.this(a);
    let case = builder.wildcard();
    let match_expr = builder.match_expr(this, &[case]);
    builder.add_stat(a, match_expr);

    let this = builder.this(a);
    let seq = builder.seq_literal(&[this]);
    builder.add_stat(a, seq);

    let m = builder.add_method(a, "m", &[]);
    let this = builder.this(a);
    let return_expr = builder.return_expr(this);
    builder.set_body(m, return_expr);
    let call = builder.call_ident(m, &[]);
    builder.add_stat(a, call);

    let this = builder.this(a);
    let unchecked = builder.typed(this, true);
    let call = consume(&mut builder, helper, unchecked);
    builder.add_stat(a, call);

    let late = builder.add_field(a, "late");
    set_literal(&mut builder, late);

    let (output, config) = check_class(builder, a);
    expect_errors!(
        output,
        config,
        [
            InitErrorKind::PromoteError { msg } if msg.contains("assigned"),
            InitErrorKind::PromoteError { msg } if msg.contains("matched"),
            InitErrorKind::PromoteError { msg } if msg.contains("sequence"),
            InitErrorKind::PromoteError { msg } if msg.contains("returned"),
        ]
    );
}

#[test]
fn test_local_method_arguments_are_not_promoted() {
    // class A {
    //   def m() = { def helper(p) = 1; helper(this) }
    //   val x = m()
    //   val late = 1
    // }
    let mut builder = ProgramBuilder::new();
    let a = builder.add_class("A", ClassOwner::Package);
    let m = builder.add_method(a, "m", &[]);
    let helper = builder.add_local_method(m, "helper", &["p"]);
    set_literal(&mut builder, helper);
    let def = builder.def_def(helper);
    let this = builder.this(a);
    let call = builder.call_ident(helper, &[Arg::new(this)]);
    let block = builder.block(&[def], call);
    builder.set_body(m, block);

    let x = builder.add_field(a, "x");
    let call = builder.call_ident(m, &[]);
    builder.set_body(x, call);
    let late = builder.add_field(a, "late");
    set_literal(&mut builder, late);

    let (output, config) = check_class(builder, a);
    expect_ok!(output, config);
}

#[test]
fn test_local_values_in_blocks() {
    // class A {
    //   val x = { val l = this; l }
    //   Helper.consume(x)
    //   val late = 1
    // }
    let mut builder = ProgramBuilder::new();
    let helper = add_helper(&mut builder);
    let a = builder.add_class("A", ClassOwner::Package);
    let x = builder.add_field(a, "x");
    let local = builder.add_local_val(x, "l");
    let this = builder.this(a);
    builder.set_body(local, this);
    let def = builder.val_def(local);
    let local_ref = builder.ident(local);
    let block = builder.block(&[def], local_ref);
    builder.set_body(x, block);

    let x_ref = builder.ident(x);
    let call = consume(&mut builder, helper, x_ref);
    builder.add_stat(a, call);
    let late = builder.add_field(a, "late");
    set_literal(&mut builder, late);

    let (output, config) = check_class(builder, a);
    expect_errors!(output, config, [InitErrorKind::PromoteError { .. }]);
}

#[test]
fn test_abstract_classes_can_be_skipped() {
    // abstract class A { val a = b; val b = 1 }
    let mut builder = ProgramBuilder::new();
    let class = builder.add_abstract_class("A", ClassOwner::Package);
    let a = builder.add_field(class, "a");
    let b = builder.add_field(class, "b");
    let b_ref = builder.ident(b);
    builder.set_body(a, b_ref);
    set_literal(&mut builder, b);

    let mut config = CheckConfig::new(builder.finish());
    assert_eq!(config.check_program().errors.len(), 1);

    config.compile_context.config.check_abstract_classes = false;
    let output = config.check_program();
    expect_ok!(output, config);
}

#[test]
fn test_errors_carry_the_evaluation_path() {
    // class A { val x = m(); def m = if (1) late else 1; val late = 1 }
    let mut builder = ProgramBuilder::new();
    let a = builder.add_class("A", ClassOwner::Package);
    builder.set_class_span(a, Span::new(0, 9));
    let x = builder.add_field(a, "x");
    let m = builder.add_method(a, "m", &[]);
    let late = builder.add_field(a, "late");
    set_literal(&mut builder, late);

    let call = builder.call_ident(m, &[]);
    let call = builder.spanned(call, Span::new(10, 3));
    builder.set_body(x, call);
    let cond = builder.literal();
    let late_ref = builder.ident(late);
    let late_ref = builder.spanned(late_ref, Span::new(36, 4));
    let one = builder.literal();
    let branch = builder.if_else(cond, late_ref, one);
    let branch = builder.spanned(branch, Span::new(30, 20));
    builder.set_body(m, branch);

    let (output, config) = check_class(builder, a);
    expect_errors!(
        output,
        config,
        [InitErrorKind::AccessNonInit { field } if *field == "late"]
    );
    let error = output.errors.iter().next().unwrap();
    assert_eq!(error.span, Span::new(36, 4));
    assert_eq!(error.trace.first(), Some(&Span::new(0, 9)));
    assert!(
        error
            .trace
            .ends_with(&[Span::new(10, 3), Span::new(30, 20), Span::new(36, 4)]),
        "{:?}",
        error.trace
    );
}

#[test]
fn test_render_errors() {
    let source = "class A {\n  val b = c\n  val c = 1\n}\n";
    let mut builder = ProgramBuilder::new();
    let class = builder.add_class("A", ClassOwner::Package);
    builder.set_class_span(class, Span::new(0, 9));
    let b = builder.add_field(class, "b");
    let c = builder.add_field(class, "c");
    let c_ref = builder.ident(c);
    let c_ref = builder.spanned(c_ref, Span::new(20, 1));
    builder.set_body(b, c_ref);
    set_literal(&mut builder, c);

    let mut config = CheckConfig::new(builder.finish());
    config.add_source(source, Some("A.scala"));
    let output = config.check_class(class);

    let rendered = output.format(&config.compile_context);
    assert!(rendered.contains("Access non-initialized field 'c'"), "{rendered}");
    assert!(rendered.contains("A.scala"), "{rendered}");
    assert_eq!(output.errors.iter().next().unwrap().span, Span::new(20, 1));

    let named = config.check_class_named("A").unwrap();
    assert_eq!(error_kinds(&named), error_kinds(&output));
    assert!(config.check_class_named("Missing").is_none());
}

#[test]
fn test_internal_diagnostics() {
    // class A { val f = () => 1; val x = f.x }
    let mut builder = ProgramBuilder::new();
    let a = builder.add_class("A", ClassOwner::Package);
    let f = builder.add_field(a, "f");
    let x = builder.add_field(a, "x");
    let function = builder.add_anonymous_function(SymbolOwner::Symbol(f), &[]);
    let one = builder.literal();
    let closure = builder.closure(function, one);
    builder.set_body(f, closure);
    let f_ref = builder.ident(f);
    let select = builder.select(f_ref, x);
    builder.set_body(x, select);

    let mut config = CheckConfig::new(builder.finish());
    let output = config.check_class(a);
    assert!(output.is_ok());
    assert_eq!(output.diagnostics.len(), 1);
    assert!(output
        .format(&config.compile_context)
        .contains("Unexpected selection of field 'x' on a closure"));

    config.compile_context.config.report_internal = false;
    assert_eq!(output.format(&config.compile_context), "");
}
