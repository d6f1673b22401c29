use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

#[allow(dead_code)]
#[path = "../render.rs"]
mod render;

use netcfg_core::overrides::Overrides;
use netcfg_core::platform::Platform;
use netcfg_core::resolve::resolve_hardware;

/// Writes the default parameter table of every platform, either to stdout or
/// to `<dir>/<platform>.txt` when a directory is given.
fn main() -> io::Result<()> {
    let target = env::args().nth(1);
    for platform in Platform::ALL {
        let hardware = resolve_hardware(platform, &Overrides::new())
            .map_err(|error| io::Error::other(format!("{} default table: {error:?}", platform)))?;
        let mut lines = vec![format!("# {platform} defaults")];
        lines.extend(render::parameter_table(&hardware));

        match target.as_deref() {
            Some(dir) => {
                let dir = Path::new(dir);
                fs::create_dir_all(dir)?;
                let mut text = lines.join("\n");
                text.push('\n');
                fs::write(dir.join(format!("{}.txt", platform.name())), text)?;
            }
            None => {
                let stdout = io::stdout();
                let mut writer = stdout.lock();
                for line in &lines {
                    writeln!(writer, "{line}")?;
                }
                writeln!(writer)?;
            }
        }
    }
    Ok(())
}
