use std::io::{BufRead, Write};
use std::path::Path;

use crate::utils::Result;

/// Interactively create a .env file holding the given variables
///
/// Returns `Ok(true)` when the file was written, `Ok(false)` when the user declined,
/// input ended early, or a file already exists at `path`.
pub fn create_dotenv_file<R, W>(
    variable_names: &[&str],
    path: &Path,
    input: &mut R,
    output: &mut W,
) -> Result<bool>
where
    R: BufRead,
    W: Write,
{
    if path.exists() {
        writeln!(
            output,
            "A .env file already exists at {}. Add the missing variables to it manually: {}",
            path.display(),
            variable_names.join(", ")
        )?;
        return Ok(false);
    }

    write!(
        output,
        "Would you like to create a .env file at {} now? [y/N]: ",
        path.display()
    )?;
    output.flush()?;

    let Some(answer) = read_line(input)? else {
        return Ok(false);
    };
    if !matches!(answer.to_lowercase().as_str(), "y" | "yes") {
        return Ok(false);
    }

    let mut lines = Vec::with_capacity(variable_names.len());
    for name in variable_names {
        let value = loop {
            write!(output, "Please enter {}: ", name)?;
            output.flush()?;

            match read_line(input)? {
                None => return Ok(false),
                Some(value) if value.is_empty() => {
                    writeln!(output, "The value cannot be empty.")?;
                }
                Some(value) => break value,
            }
        };
        lines.push(format!("{}={}", name, value));
    }

    let mut contents = lines.join("\n");
    contents.push('\n');
    std::fs::write(path, contents)?;
    writeln!(output, "Created {}", path.display())?;

    Ok(true)
}

/// Read one trimmed line, `None` on end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
