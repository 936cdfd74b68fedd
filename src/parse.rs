use std::ffi::{OsStr, OsString};

/// A helper trait for converting OS strings from the CLI into `&str`.
///
/// Everything this tool accepts is ASCII, so a non-UTF-8 argument is
/// always an error worth reporting rather than data to pass through.
pub trait OsStrExt {
    fn as_os_str_slice(&self) -> &OsStr;

    /// Converts this OS string to a string slice.
    fn to_str(&self) -> anyhow::Result<&str> {
        let osstr = self.as_os_str_slice();
        osstr.to_str().ok_or_else(|| {
            anyhow::anyhow!("{osstr:?} is not valid UTF-8")
        })
    }
}

impl OsStrExt for OsStr {
    fn as_os_str_slice(&self) -> &OsStr {
        self
    }
}

impl OsStrExt for OsString {
    fn as_os_str_slice(&self) -> &OsStr {
        self.as_os_str()
    }
}
