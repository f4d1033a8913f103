mod common;

use common::sample_card;
use shopbingo_engine::called::CalledSet;
use shopbingo_engine::card::{is_marked, BingoCard, Column, Coord};
use shopbingo_engine::errors::CardError;

#[test]
fn grid_transposes_columns_into_rows() {
    let grid = sample_card(1).grid();
    assert_eq!(
        grid.rows()[0],
        [Some(1), Some(16), Some(31), Some(46), Some(61)]
    );
    assert_eq!(grid.cell(4, 0), Some(5));
    assert_eq!(grid.cell(0, 4), Some(61));
    assert_eq!(grid.cell(2, 2), None);
}

#[test]
fn free_space_is_always_marked() {
    let called = CalledSet::new();
    assert!(is_marked(None, &called));
    assert!(!is_marked(Some(7), &called));
    let grid = sample_card(1).grid();
    assert_eq!(grid.marked_coords(&called), vec![Coord::new(2, 2)]);
}

#[test]
fn marked_cells_follow_called_set() {
    let grid = sample_card(1).grid();
    let called: CalledSet = [1, 65, 70].into_iter().collect();
    assert_eq!(
        grid.marked_coords(&called),
        vec![Coord::new(0, 0), Coord::new(2, 2), Coord::new(4, 4)]
    );
}

#[test]
fn card_record_parses_from_catalog_json() {
    let json = r#"{"card_id":12,"B":[1,2,3,4,5],"I":[16,17,18,19,20],
        "N":[31,32,null,34,35],"G":[46,47,48,49,50],"O":[61,62,63,64,65]}"#;
    let card: BingoCard = serde_json::from_str(json).expect("valid card");
    assert_eq!(card.card_id(), 12);
    assert_eq!(card.column(Column::N)[2], None);
    assert_eq!(card, sample_card(12));
}

#[test]
fn card_serializes_back_to_catalog_shape() {
    let value = serde_json::to_value(sample_card(4)).unwrap();
    assert_eq!(value["card_id"], 4);
    assert_eq!(value["N"][2], serde_json::Value::Null);
    assert_eq!(value["O"][4], 65);
}

#[test]
fn malformed_records_are_rejected() {
    let zero_id = r#"{"card_id":0,"B":[1,2,3,4,5],"I":[16,17,18,19,20],
        "N":[31,32,null,34,35],"G":[46,47,48,49,50],"O":[61,62,63,64,65]}"#;
    assert!(serde_json::from_str::<BingoCard>(zero_id).is_err());

    let too_big = r#"{"card_id":2,"B":[1,2,3,4,5],"I":[16,17,18,19,20],
        "N":[31,32,null,34,35],"G":[46,47,48,49,50],"O":[61,62,63,64,300]}"#;
    let err = serde_json::from_str::<BingoCard>(too_big).unwrap_err();
    assert!(err.to_string().contains("outside 1..=75"));

    let mut cols = [[Some(10u8); 5]; 5];
    cols[2][2] = None;
    cols[3][1] = None;
    assert_eq!(
        BingoCard::new(5, cols),
        Err(CardError::MisplacedFreeSpace {
            card_id: 5,
            column: 'G',
            row: 1
        })
    );
}
