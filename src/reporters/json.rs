use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use crate::error::Result;
use crate::types::Digest;

/// Outputs the digest as pretty JSON. Writes to a file if given, otherwise stdout.
pub fn report_json(digest: &Digest, output_file: Option<&Path>) -> Result<()> {
    if let Some(path) = output_file {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        write_json(digest, &mut writer)?;
        writer.flush()?;
        eprintln!("✓ JSON report written to {}", path.display());
    } else {
        let stdout = std::io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        write_json(digest, &mut writer)?;
        writer.flush()?;
    }

    Ok(())
}

pub fn write_json<W: Write>(digest: &Digest, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, digest)?;
    writer.write_all(b"\n")?;
    Ok(())
}
