use std::io::Write;

use anyhow::Result;
use serde_json::Value;

/// Writes one item per line, or a single pretty JSON array.
pub fn write_lines<I, S>(out: &mut impl Write, items: I, json: bool) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    if json {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        serde_json::to_writer_pretty(&mut *out, &items)?;
        writeln!(out)?;
    } else {
        for item in items {
            writeln!(out, "{}", item.into())?;
        }
    }
    Ok(())
}

/// Writes spec entries: strings verbatim and objects as compact JSON.
pub fn write_values(out: &mut impl Write, values: &[&Value], json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, values)?;
        writeln!(out)?;
        return Ok(());
    }
    for value in values {
        match value {
            Value::String(text) => writeln!(out, "{text}")?,
            other => writeln!(out, "{other}")?,
        }
    }
    Ok(())
}
