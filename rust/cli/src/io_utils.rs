//! File and stdin helpers shared by commands.

use std::io::BufRead;
use std::path::Path;

/// Reads one operator line, trimmed. `Ok(None)` on EOF.
///
/// # Example
///
/// ```rust
/// use std::io::Cursor;
/// # use shopbingo_cli::io_utils::read_operator_line;
///
/// let mut input = Cursor::new("  check 12 \n");
/// assert_eq!(read_operator_line(&mut input).unwrap(), Some("check 12".to_string()));
/// assert_eq!(read_operator_line(&mut input).unwrap(), None);
/// ```
pub fn read_operator_line(stdin: &mut dyn BufRead) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    match stdin.read_line(&mut line)? {
        0 => Ok(None),
        _ => Ok(Some(line.trim().to_string())),
    }
}

/// Reads a text file, dropping a leading UTF-8 BOM.
pub fn read_text(path: &Path) -> Result<String, String> {
    let mut content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Ensure parent directory exists for given path, creating if needed.
pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
