//! Lookup and reference functions

use std::cmp::Ordering;

use cellcalc_core::{serial, ErrorKind, ScalarValue};
use regex::{Regex, RegexBuilder};

use super::coerce;
use super::{FnResult, FunctionDef, FunctionModule};
use crate::argument::FunctionArgument;
use crate::context::ParsingContext;
use crate::result::CompileResult;

/// CHOOSE(index_num, value1, [value2], ...)
pub fn fn_choose(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let index = coerce::integer(&args[0], ctx)?;
    if index < 1 || index as usize >= args.len() {
        return Err(ErrorKind::Value);
    }
    Ok(CompileResult::from_argument(&args[index as usize]))
}

fn position(arg: Option<&FunctionArgument>, ctx: &ParsingContext) -> Result<Option<usize>, ErrorKind> {
    match arg.filter(|a| !a.is_blank()) {
        Some(a) => {
            let n = coerce::integer(a, ctx)?;
            if n < 0 {
                return Err(ErrorKind::Value);
            }
            Ok(Some(n as usize))
        }
        None => Ok(None),
    }
}

/// INDEX(array, row_num, [column_num])
///
/// A zero row or column selects the whole column or row.
pub fn fn_index(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let array = &args[0];
    if let Some(e) = array.error() {
        return Err(e);
    }
    let (rows, cols) = array.shape();
    let mut row = position(args.get(1), ctx)?.unwrap_or(0);
    let mut col = position(args.get(2), ctx)?;

    // A single row indexed by one number is read along its columns
    if rows == 1 && cols > 1 && col.is_none() {
        col = Some(row);
        row = 1;
    }
    let col = col.unwrap_or(if cols == 1 { 1 } else { 0 });
    if row > rows || col > cols {
        return Err(ErrorKind::Ref);
    }

    match (row, col) {
        (0, 0) => Ok(CompileResult::array(array.clone())),
        (0, c) => {
            let cells = (0..rows).filter_map(|r| array.cell_at(r, c - 1).cloned());
            Ok(CompileResult::array(FunctionArgument::range(cells)))
        }
        (r, 0) => {
            let cells = (0..cols).filter_map(|c| array.cell_at(r - 1, c).cloned());
            Ok(CompileResult::array(FunctionArgument::rows([cells])))
        }
        (r, c) => array
            .cell_at(r - 1, c - 1)
            .map(CompileResult::from_argument)
            .ok_or(ErrorKind::Ref),
    }
}

/// Regex for a lookup value with `*` and `?` wildcards; `~` escapes them
fn wildcard_regex(pattern: &str) -> Option<Regex> {
    if !pattern.contains(|c: char| c == '*' || c == '?') {
        return None;
    }
    let mut re = String::from("^");
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            '~' => {
                if let Some(next) = chars.next() {
                    re.push_str(&regex::escape(&next.to_string()));
                }
            }
            other => re.push_str(&regex::escape(&other.to_string())),
        }
    }
    re.push('$');
    RegexBuilder::new(&re).case_insensitive(true).build().ok()
}

/// Ordering between values of the same kind; `None` across kinds
fn compare(a: &ScalarValue, b: &ScalarValue) -> Option<Ordering> {
    match (comparable(a)?, comparable(b)?) {
        (Comparable::Number(x), Comparable::Number(y)) => x.partial_cmp(&y),
        (Comparable::Text(x), Comparable::Text(y)) => Some(x.cmp(&y)),
        (Comparable::Boolean(x), Comparable::Boolean(y)) => Some(x.cmp(&y)),
        _ => None,
    }
}

enum Comparable {
    Number(f64),
    Text(String),
    Boolean(bool),
}

fn comparable(value: &ScalarValue) -> Option<Comparable> {
    match value {
        ScalarValue::Number(n) => Some(Comparable::Number(*n)),
        ScalarValue::Date(d) => serial::datetime_to_serial(*d).ok().map(Comparable::Number),
        ScalarValue::Text(s) => Some(Comparable::Text(s.to_lowercase())),
        ScalarValue::Boolean(b) => Some(Comparable::Boolean(*b)),
        ScalarValue::Blank | ScalarValue::Error(_) => None,
    }
}

/// MATCH(lookup_value, lookup_array, [match_type])
///
/// Match type 0 finds an exact match (text may use wildcards), 1 the largest
/// value not above the lookup value in an ascending list, and -1 the smallest
/// value not below it in a descending list.
pub fn fn_match(args: &[FunctionArgument], ctx: &ParsingContext) -> FnResult {
    let lookup = coerce::scalar(&args[0])?;
    if let ScalarValue::Error(e) = lookup {
        return Err(*e);
    }
    let match_type = coerce::number_or(args, 2, 1.0, ctx)?;

    let (rows, cols) = args[1].shape();
    if rows > 1 && cols > 1 {
        return Err(ErrorKind::Na);
    }
    let cells = args[1].cells();
    let values = cells.iter().map(|c| c.as_scalar().unwrap_or(&ScalarValue::Blank));

    let found = if match_type == 0.0 {
        let pattern = lookup.as_text().and_then(wildcard_regex);
        values.enumerate().find_map(|(i, v)| {
            let hit = match (&pattern, v) {
                (Some(re), ScalarValue::Text(s)) => re.is_match(s),
                _ => compare(v, lookup) == Some(Ordering::Equal),
            };
            hit.then_some(i)
        })
    } else {
        let wanted = if match_type > 0.0 {
            Ordering::Greater
        } else {
            Ordering::Less
        };
        let mut last = None;
        for (i, v) in values.enumerate() {
            match compare(v, lookup) {
                Some(ord) if ord == wanted => break,
                Some(_) => last = Some(i),
                None => {}
            }
        }
        last
    };

    found
        .map(|i| CompileResult::number((i + 1) as f64))
        .ok_or(ErrorKind::Na)
}

/// ROWS(array)
pub fn fn_rows(args: &[FunctionArgument], _ctx: &ParsingContext) -> FnResult {
    if let Some(e) = args[0].error() {
        return Err(e);
    }
    Ok(CompileResult::number(args[0].shape().0 as f64))
}

/// COLUMNS(array)
pub fn fn_columns(args: &[FunctionArgument], _ctx: &ParsingContext) -> FnResult {
    if let Some(e) = args[0].error() {
        return Err(e);
    }
    Ok(CompileResult::number(args[0].shape().1 as f64))
}

/// Lookup function module
pub fn module() -> FunctionModule {
    let mut module = FunctionModule::new();

    // CHOOSE
    module.add(FunctionDef {
        name: "CHOOSE",
        min_args: 2,
        max_args: Some(255),
        implementation: fn_choose,
        volatile: false,
    });

    // INDEX
    module.add(FunctionDef {
        name: "INDEX",
        min_args: 2,
        max_args: Some(3),
        implementation: fn_index,
        volatile: false,
    });

    // MATCH
    module.add(FunctionDef {
        name: "MATCH",
        min_args: 2,
        max_args: Some(3),
        implementation: fn_match,
        volatile: false,
    });

    // ROWS
    module.add(FunctionDef {
        name: "ROWS",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_rows,
        volatile: false,
    });

    // COLUMNS
    module.add(FunctionDef {
        name: "COLUMNS",
        min_args: 1,
        max_args: Some(1),
        implementation: fn_columns,
        volatile: false,
    });

    module
}
