#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("No package name: pass --package or run under `go generate` (which sets $GOPACKAGE)")]
    MissingPackage,

    #[error("Cannot derive an option name from type {0:?}: pass --name")]
    EmptyOptionName(String),
}
