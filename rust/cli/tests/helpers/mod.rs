//! Shared helpers for CLI integration tests.
//!
//! Commands run in-process through `run_with_input`, with operator input supplied as a
//! string.

#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str], input: &str) -> CliResult {
    let mut argv = vec!["shopbingo"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut stdin = Cursor::new(input.as_bytes().to_vec());
    let exit_code = shopbingo_cli::run_with_input(argv, &mut out, &mut err, &mut stdin);
    CliResult {
        exit_code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

/// Two cards with known numbers: card 1 uses the lowest five of each column, card 2 the
/// next five.
pub const TWO_CARDS: &str = r#"[
  {"card_id":1,"B":[1,2,3,4,5],"I":[16,17,18,19,20],"N":[31,32,null,34,35],"G":[46,47,48,49,50],"O":[61,62,63,64,65]},
  {"card_id":2,"B":[6,7,8,9,10],"I":[21,22,23,24,25],"N":[36,37,null,39,40],"G":[51,52,53,54,55],"O":[66,67,68,69,70]}
]"#;

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

pub fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
