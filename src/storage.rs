use crate::model::Department;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Contrat d'accès au support de l'instantané de service. Le solveur
/// lui-même ne touche jamais au stockage : il consomme l'instantané chargé.
pub trait Storage {
    /// Charge l'instantané du service.
    fn load(&self) -> anyhow::Result<Department>;
    /// Sauvegarde de manière atomique.
    fn save(&self, department: &Department) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Department> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let department: Department =
            serde_json::from_slice(&data).with_context(|| "parsing department.json")?;
        Ok(department)
    }

    fn save(&self, department: &Department) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(department)?;
        let mut tmp =
            NamedTempFile::new_in(self.path.parent().unwrap_or_else(|| Path::new(".")))
                .with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
