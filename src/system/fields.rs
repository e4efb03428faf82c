//! Line tokenizing for the loosely structured text under `/proc`.
//!
//! Every extractor is best-effort: a missing or non-numeric token yields
//! `None` (or zero through the `_or_zero` helpers), never an error.

/// Whether tabs count as field separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tabs {
    Keep,
    AsSpace,
}

/// Collapses runs of spaces into one and trims the ends.
pub fn normalize(line: &str, tabs: Tabs) -> String {
    tokenize(line, tabs).join(" ")
}

pub fn tokenize(line: &str, tabs: Tabs) -> Vec<&str> {
    line.split(|c: char| c == ' ' || c == '\n' || (tabs == Tabs::AsSpace && c == '\t'))
        .filter(|token| !token.is_empty())
        .collect()
}

/// 1-indexed positional access into a tokenized line.
pub fn field(tokens: &[&str], position: usize) -> Option<u64> {
    position
        .checked_sub(1)
        .and_then(|idx| tokens.get(idx))
        .and_then(|token| token.parse().ok())
}

pub fn field_or_zero(tokens: &[&str], position: usize) -> u64 {
    field(tokens, position).unwrap_or(0)
}

/// First value token of the first `Key: value` line whose key matches.
///
/// Tabs are treated as spaces so `/proc/<pid>/status` lines such as
/// `Uid:\t1000\t1000\t1000\t1000` resolve to `1000`.
pub fn key_value<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    text.lines().find_map(|line| {
        let mut tokens = tokenize(line, Tabs::AsSpace).into_iter();
        let head = tokens.next()?;
        let name = head.strip_suffix(':')?;
        if name == key { tokens.next() } else { None }
    })
}

pub fn key_value_u64(text: &str, key: &str) -> Option<u64> {
    key_value(text, key)?.parse().ok()
}

/// Value of the first line whose first token equals `key` exactly, as used
/// by `processes 1234` in the global stat file.
pub fn labelled_u64(text: &str, key: &str) -> Option<u64> {
    text.lines().find_map(|line| {
        let tokens = tokenize(line, Tabs::Keep);
        match tokens.as_slice() {
            [name, value, ..] if *name == key => value.parse().ok(),
            _ => None,
        }
    })
}

/// Field positions in `/proc/<pid>/stat`, 1-indexed as documented in proc(5).
///
/// Kernel format drift is fixed here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    Comm,
    Utime,
    Stime,
    StartTime,
}

impl StatField {
    pub const fn position(self) -> usize {
        match self {
            StatField::Comm => 2,
            StatField::Utime => 14,
            StatField::Stime => 15,
            StatField::StartTime => 22,
        }
    }
}

/// Tokenizes a per-process stat line.
///
/// The `comm` field is wrapped in parentheses and may itself contain spaces
/// or parentheses, so everything between the first `(` and the last `)` is
/// kept as one token to keep positions aligned.
pub fn stat_tokens(line: &str) -> Vec<&str> {
    let line = line.trim();
    let (Some(open), Some(close)) = (line.find('('), line.rfind(')')) else {
        return tokenize(line, Tabs::Keep);
    };
    if close < open {
        return tokenize(line, Tabs::Keep);
    }

    let mut tokens = tokenize(&line[..open], Tabs::Keep);
    tokens.push(&line[open..=close]);
    tokens.extend(tokenize(&line[close + 1..], Tabs::Keep));
    tokens
}

pub fn stat_field(tokens: &[&str], which: StatField) -> u64 {
    field_or_zero(tokens, which.position())
}

/// The command name from a stat line, without its parentheses.
pub fn stat_comm<'a>(tokens: &[&'a str]) -> Option<&'a str> {
    let raw = tokens.get(StatField::Comm.position() - 1)?;
    raw.strip_prefix('(')?.strip_suffix(')')
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAT_LINE: &str = "4821 (Web Content) S 4790 4790 4790 0 -1 4194560 \
        106812 0 0 0 2310 412 0 0 20 0 28 0 18733 2862579712 62120 \
        18446744073709551615";

    #[test]
    fn normalize_collapses_spaces() {
        assert_eq!(normalize("  MemTotal:      16384  kB ", Tabs::Keep), "MemTotal: 16384 kB");
        assert_eq!(normalize("Uid:\t1000\t1000", Tabs::Keep), "Uid:\t1000\t1000");
        assert_eq!(normalize("Uid:\t1000\t1000", Tabs::AsSpace), "Uid: 1000 1000");
    }

    #[test]
    fn positional_fields_are_one_indexed_and_best_effort() {
        let tokens = tokenize("cpu  10 0 5 85", Tabs::Keep);
        assert_eq!(field(&tokens, 2), Some(10));
        assert_eq!(field(&tokens, 1), None);
        assert_eq!(field(&tokens, 0), None);
        assert_eq!(field(&tokens, 9), None);
        assert_eq!(field_or_zero(&tokens, 9), 0);
    }

    #[test]
    fn key_value_handles_tabs_and_padding() {
        let status = "Name:\tbash\nVmSize:\t   22668 kB\nUid:\t1000\t1000\t1000\t1000\n";
        assert_eq!(key_value(status, "Name"), Some("bash"));
        assert_eq!(key_value_u64(status, "VmSize"), Some(22668));
        assert_eq!(key_value_u64(status, "Uid"), Some(1000));
        assert_eq!(key_value(status, "Gid"), None);
        assert_eq!(key_value(status, "Vm"), None);
    }

    #[test]
    fn labelled_values_require_exact_label() {
        let stat = "cpu 1 2 3\nprocs_running 3\nprocesses 912\nprocs_blocked 0\n";
        assert_eq!(labelled_u64(stat, "processes"), Some(912));
        assert_eq!(labelled_u64(stat, "procs_running"), Some(3));
        assert_eq!(labelled_u64(stat, "procs"), None);
    }

    #[test]
    fn stat_tokens_keep_comm_with_spaces_whole() {
        let tokens = stat_tokens(STAT_LINE);
        assert_eq!(tokens[0], "4821");
        assert_eq!(stat_comm(&tokens), Some("Web Content"));
        assert_eq!(stat_field(&tokens, StatField::Utime), 2310);
        assert_eq!(stat_field(&tokens, StatField::Stime), 412);
        assert_eq!(stat_field(&tokens, StatField::StartTime), 18733);
    }

    #[test]
    fn stat_tokens_tolerate_parentheses_inside_comm() {
        let tokens = stat_tokens("9 (a) b) R 1 1 1 0 -1 0 0 0 0 0 7 3");
        assert_eq!(stat_comm(&tokens), Some("a) b"));
        assert_eq!(stat_field(&tokens, StatField::Utime), 7);
        assert_eq!(stat_field(&tokens, StatField::Stime), 3);
        assert_eq!(stat_field(&tokens, StatField::StartTime), 0);
    }

    #[test]
    fn truncated_stat_line_defaults_to_zero() {
        let tokens = stat_tokens("12 (sh)");
        assert_eq!(stat_field(&tokens, StatField::Utime), 0);
        assert!(stat_tokens("").is_empty());
    }
}
