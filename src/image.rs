use std::fs;
use std::io::Read;
use std::path::*;

use crate::config::expand_home;
use crate::error::*;

/// Precompiled kernel binary (e.g. `*.xclbin`), read whole into memory
#[derive(Debug, Clone)]
pub struct KernelImage {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl KernelImage {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = expand_home(path);
        let comment = path.display().to_string();
        let mut f = fs::File::open(&path).log(Step::Load, &format!("Failed to open file: {}", comment))?;
        let mut bytes = Vec::new();
        f.read_to_end(&mut bytes)
            .log(Step::Load, &format!("Failed to read file: {}", comment))?;
        if bytes.is_empty() {
            return Err(err_msg(Step::Load, &format!("File is empty: {}", comment)));
        }
        info!("Loaded kernel image {} ({} bytes)", comment, bytes.len());
        Ok(KernelImage { path, bytes })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
