use crate::ast::AstBuilder;
use crate::context::Context;
use crate::test_fixtures::{check_all, checker, kinds, ty};
use phz_common::IssueKind;
use phz_solver::UnionType;
use rayon::prelude::*;

/// One "file": a handful of calls, each with its own builder and state.
fn check_file(index: usize) -> (Vec<IssueKind>, Option<UnionType>) {
    let mut b = AstBuilder::new();
    let mut ctx = Context::new();
    ctx.set_var("$dog", ty("Dog"));
    let mut state = checker();

    let dog = b.var("dog");
    let item = b.string("stick");
    let fetch = b.method_call(dog, "fetch", vec![item]);
    let mut exprs = vec![fetch.clone()];
    if index % 2 == 1 {
        let count = b.int(i64::try_from(index).unwrap_or_default());
        exprs.push(b.call("greet", vec![count]));
    }
    check_all(&mut state, &exprs, &mut ctx).unwrap();
    (kinds(&state), state.expr_type(fetch.id).cloned())
}

#[test]
fn states_over_a_shared_registry_are_independent() {
    let results: Vec<_> = (0..64).into_par_iter().map(check_file).collect();
    for (index, (kinds, fetch_type)) in results.into_iter().enumerate() {
        let expected: &[IssueKind] = if index % 2 == 1 {
            &[IssueKind::InvalidArgument]
        } else {
            &[]
        };
        assert_eq!(kinds, expected, "file {index}");
        assert_eq!(fetch_type, Some(ty("string|null")));
    }
}

#[test]
fn parallel_results_match_sequential_results() {
    let sequential: Vec<_> = (0..16).map(check_file).collect();
    let parallel: Vec<_> = (0..16).into_par_iter().map(check_file).collect();
    assert_eq!(sequential, parallel);
}
