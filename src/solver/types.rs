use thiserror::Error;

/// Réglages d'une résolution.
#[derive(Debug, Clone, Copy)]
pub struct SolveOptions {
    /// Écart max toléré (max − min) entre compteurs d'un même rôle,
    /// visé par la passe d'équilibrage. Valeur ≤ 0 ramenée à 1.
    pub max_diff_allowed: i32,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self { max_diff_allowed: 1 }
    }
}

impl SolveOptions {
    pub(crate) fn effective_max_diff(&self) -> u32 {
        if self.max_diff_allowed <= 0 {
            1
        } else {
            self.max_diff_allowed as u32
        }
    }
}

/// Les deux seules familles d'erreurs : identifiant de mois malformé et
/// données d'entrée incohérentes. Le sous-effectif n'est jamais une erreur,
/// il se lit dans la sortie par omission.
#[derive(Error, Debug)]
pub enum SolveError {
    #[error("invalid month identifier: {0}")]
    InvalidMonth(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
