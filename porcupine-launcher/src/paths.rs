//! Path derivation from the launcher's own location.
//!
//! All paths are kept as UTF-16 exactly as the platform reported them, so a
//! derived path is always a byte-for-byte prefix of the launcher path plus a
//! fixed suffix.
//!
//! ```text
//! C:\Porcupine\Python\Porcupine.exe
//!     interpreter -> C:\Porcupine\Python\python.exe
//!     script      -> C:\Porcupine\launch.pyw
//! ```

use widestring::U16Str;
use widestring::U16String;

use crate::config::IdentityPolicy;
use crate::config::INTERPRETER_NAME;
use crate::config::SCRIPT_NAME;
use crate::error::LaunchError;

pub const SEPARATOR: u16 = b'\\' as u16;

fn last_separator(path: &U16Str) -> Option<usize> {
    path.as_slice().iter().rposition(|&unit| unit == SEPARATOR)
}

/// `path` with its last segment (and the separator before it) removed
fn parent(path: &U16Str) -> Option<&U16Str> {
    last_separator(path).map(|idx| U16Str::from_slice(&path.as_slice()[..idx]))
}

/// Strips `levels` trailing segments from `path` and appends `\name`
fn sibling_of_ancestor(
    path: &U16Str,
    levels: usize,
    name: &'static str,
) -> Result<U16String, LaunchError> {
    let mut ancestor = path;
    for _ in 0..levels {
        ancestor = parent(ancestor).ok_or_else(|| LaunchError::PathMalformed {
            path: path.to_string_lossy(),
            required: levels,
            target: name,
        })?;
    }

    let mut derived = U16String::with_capacity(ancestor.len() + 1 + name.len());
    derived.push(ancestor);
    derived.push_slice([SEPARATOR]);
    derived.push_str(name);

    Ok(derived)
}

/// `...\A\B\Exe` -> `...\launch.pyw`
pub fn launcher_script_path(own_path: &U16Str) -> Result<U16String, LaunchError> {
    sibling_of_ancestor(own_path, 2, SCRIPT_NAME)
}

/// `...\A\Exe` -> `...\A\python.exe`
pub fn interpreter_executable_path(own_path: &U16Str) -> Result<U16String, LaunchError> {
    sibling_of_ancestor(own_path, 1, INTERPRETER_NAME)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchPaths {
    pub own: U16String,
    pub script: U16String,
    pub interpreter: U16String,
}

impl LaunchPaths {
    pub fn derive(own_path: &U16Str) -> Result<Self, LaunchError> {
        Ok(Self {
            own: own_path.to_ustring(),
            script: launcher_script_path(own_path)?,
            interpreter: interpreter_executable_path(own_path)?,
        })
    }

    /// The path reported to the embedded runtime as the executable that launched it
    #[must_use]
    pub fn identity(&self, policy: IdentityPolicy) -> &U16Str {
        match policy {
            IdentityPolicy::Launcher => &self.own,
            IdentityPolicy::Interpreter => &self.interpreter,
        }
    }
}
