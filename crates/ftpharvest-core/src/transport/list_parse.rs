//! Parse Unix-style FTP LIST output into entries.
//!
//! PMC and most mirrors return `ls -l` style lines; MLSD is not assumed.

/// One parsed listing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListedItem {
    pub name: String,
    pub size: u64,
    pub is_dir: bool,
}

/// Parse the raw LIST output. Lines that do not look like `ls -l` entries
/// (totals, symlinks, malformed rows) are dropped.
///
/// Expected shape: `-rw-r--r-- 1 ftp ftp 12345 Dec 01 12:00 name with spaces`.
pub(crate) fn parse_unix_listing(raw: &str) -> Vec<ListedItem> {
    raw.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<ListedItem> {
    let line = line.trim_end_matches('\r');
    let first = line.chars().next()?;
    let is_dir = match first {
        'd' => true,
        '-' => false,
        // Skip symlinks, devices, "total N" headers, anything unexpected.
        _ => return None,
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    // perms links owner group size month day time/year name...
    if fields.len() < 9 {
        return None;
    }
    let size: u64 = fields[4].parse().ok()?;

    // The name is everything after the 8th field; recover it from the raw
    // line so embedded runs of spaces survive.
    let mut offset = 0usize;
    for field in fields.iter().take(8) {
        let rel = line[offset..].find(field)?;
        offset += rel + field.len();
    }
    let name = line[offset..].trim_start();
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }

    Some(ListedItem {
        name: name.to_string(),
        size,
        is_dir,
    })
}
