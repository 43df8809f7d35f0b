use fluxqc_standards::CatalogError;

/// Failure to turn findings into a status. Always an implementation
/// error: a check and the message table disagree.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("message for {check_id} uses placeholder {{{placeholder}}} with no value")]
    MissingArgument {
        check_id: String,
        placeholder: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// Dataset lacks what the check needs; reported as a FATAL status for
    /// that check while the remaining checks still run.
    #[error("dataset cannot be checked: {reason}")]
    DataShape { reason: String },

    #[error(transparent)]
    Status(#[from] StatusError),
}

impl CheckError {
    pub fn data_shape(reason: impl Into<String>) -> Self {
        Self::DataShape {
            reason: reason.into(),
        }
    }
}
