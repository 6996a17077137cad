use assert_cmd::Command;
use assert_cmd::cargo_bin;
use std::io::Write;
use tempfile::NamedTempFile;

/// Writes an action script with the standard header.
pub fn script(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "action,target,value").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

/// The binary, isolated from the caller's environment, running offline.
pub fn storefront() -> Command {
    let mut cmd = Command::new(cargo_bin!("storefront"));
    cmd.env_remove("STOREFRONT_API_URL")
        .env_remove("STOREFRONT_POSTAL_URL")
        .env("RUST_LOG", "storefront=info");
    cmd
}
