use shopbingo_engine::pattern::{find_non_crossing, Line};

#[test]
fn first_combination_in_slice_order_wins() {
    let lines = [Line::row(0), Line::col(0), Line::row(1), Line::row(2), Line::row(3)];
    let found = find_non_crossing(&lines, 3).expect("three rows");
    assert_eq!(found, vec![Line::row(0), Line::row(1), Line::row(2)]);
}

#[test]
fn backtracks_past_a_dead_first_choice() {
    let lines = [Line::diag(0), Line::col(1), Line::col(2), Line::col(4)];
    let found = find_non_crossing(&lines, 3).expect("three columns");
    assert_eq!(found, vec![Line::col(1), Line::col(2), Line::col(4)]);
}

#[test]
fn diagonals_cross_each_other_and_everything_else() {
    let lines = [Line::diag(0), Line::diag(1), Line::row(0)];
    assert_eq!(find_non_crossing(&lines, 2), None);
}

#[test]
fn too_few_lines_reports_none() {
    let lines = [Line::row(0), Line::row(1)];
    assert_eq!(find_non_crossing(&lines, 3), None);
    assert_eq!(find_non_crossing(&[], 3), None);
}

#[test]
fn four_disjoint_lines_among_all_twelve() {
    let found = find_non_crossing(&Line::all(), 4).expect("rows are disjoint");
    assert_eq!(
        found,
        vec![Line::row(0), Line::row(1), Line::row(2), Line::row(3)]
    );
    for (i, a) in found.iter().enumerate() {
        for b in &found[i + 1..] {
            assert!(!a.crosses(b));
        }
    }
}
