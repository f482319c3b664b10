macro_rules! debug_path {
    ($description: expr, $path: expr) => {
        tracing::debug!(
            "{} exists at {:?}: {}",
            $description,
            $path,
            $path.exists()
        );
    };
}
pub(crate) use debug_path;

macro_rules! debug_fallback_flatpak {
    () => {
        tracing::debug!("Attempting to fall back to flatpak Steam");
    };
}
pub(crate) use debug_fallback_flatpak;

macro_rules! warn_no_apps {
    ($library_id: expr) => {
        tracing::warn!("No installed apps listed for library {:?}", $library_id);
    };
}
pub(crate) use warn_no_apps;
