use serde::Serialize;

/// Prints `value` as a single JSON line. Downstream tooling reads
/// stdout in `--json` mode, so nothing else may be printed there.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}
