use std::ffi::OsString;
use std::fmt;
use std::os::raw::c_int;

use widestring::U16CString;
use widestring::U16Str;

use crate::error::LaunchError;

/// The `argc`/`argv` pair handed to the embedding entry point.
///
/// Layout: `[identity, script, original[1..]..., NULL]`. The null sentinel is
/// part of the pointer table but not of `argc`.
pub struct ArgumentVector {
    arguments: Vec<U16CString>,
    // points into the heap buffers owned by `arguments`, which never move
    pointers: Vec<*mut u16>,
    argc: c_int,
}

impl ArgumentVector {
    /// `passthrough` is the original argument list *without* its slot 0
    pub fn new<I>(identity: &U16Str, script: &U16Str, passthrough: I) -> Result<Self, LaunchError>
    where
        I: IntoIterator<Item = OsString>,
    {
        let passthrough = passthrough.into_iter();

        let mut arguments = Vec::new();
        arguments.try_reserve_exact(2 + passthrough.size_hint().0)?;
        arguments.push(
            U16CString::from_ustr(identity)
                .map_err(|_| LaunchError::ArgumentEncoding { index: 0 })?,
        );
        arguments.push(
            U16CString::from_ustr(script)
                .map_err(|_| LaunchError::ArgumentEncoding { index: 1 })?,
        );

        for argument in passthrough {
            let argument = U16CString::from_os_str(&argument).map_err(|_| {
                LaunchError::ArgumentEncoding {
                    index: arguments.len(),
                }
            })?;
            arguments.push(argument);
        }

        let argc = c_int::try_from(arguments.len()).map_err(|_| LaunchError::ArgumentCount {
            count: arguments.len(),
        })?;

        let mut pointers = Vec::new();
        pointers.try_reserve_exact(arguments.len() + 1)?;
        // Py_Main copies argv and never writes through these pointers
        pointers.extend(arguments.iter().map(|argument| argument.as_ptr().cast_mut()));
        pointers.push(std::ptr::null_mut());

        Ok(Self {
            arguments,
            pointers,
            argc,
        })
    }

    #[must_use]
    pub const fn argc(&self) -> c_int {
        self.argc
    }

    /// Null-terminated `wchar_t **argv`, valid for as long as `self` is alive
    pub fn as_mut_ptr(&mut self) -> *mut *mut u16 {
        self.pointers.as_mut_ptr()
    }

    #[must_use]
    pub fn arguments(&self) -> &[U16CString] {
        &self.arguments
    }

    #[must_use]
    pub fn to_strings_lossy(&self) -> Vec<String> {
        self.arguments
            .iter()
            .map(|argument| argument.to_string_lossy())
            .collect()
    }
}

impl fmt::Debug for ArgumentVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_strings_lossy()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use widestring::U16CStr;
    use widestring::U16String;

    fn wide(s: &str) -> U16String {
        U16String::from_str(s)
    }

    fn args(values: &[&str]) -> Vec<OsString> {
        values.iter().map(OsString::from).collect()
    }

    #[test]
    fn injected_entries_come_first() {
        let argv = ArgumentVector::new(
            &wide(r"C:\Porcupine\Python\python.exe"),
            &wide(r"C:\Porcupine\launch.pyw"),
            args(&["--flag", "x"]),
        )
        .unwrap();

        assert_eq!(argv.argc(), 4);
        assert_eq!(
            argv.to_strings_lossy(),
            vec![
                r"C:\Porcupine\Python\python.exe",
                r"C:\Porcupine\launch.pyw",
                "--flag",
                "x"
            ]
        );
    }

    #[test]
    fn pointer_table_is_null_terminated() {
        let mut argv = ArgumentVector::new(
            &wide(r"C:\a\b.exe"),
            &wide(r"C:\launch.pyw"),
            args(&["one file.py"]),
        )
        .unwrap();

        let argc = usize::try_from(argv.argc()).unwrap();
        let pointers = argv.as_mut_ptr();

        let read: Vec<String> = (0..argc)
            .map(|idx| unsafe { U16CStr::from_ptr_str(*pointers.add(idx)) }.to_string_lossy())
            .collect();

        assert_eq!(read, vec![r"C:\a\b.exe", r"C:\launch.pyw", "one file.py"]);
        assert!(unsafe { *pointers.add(argc) }.is_null());
    }

    #[test]
    fn no_passthrough_arguments() {
        let argv =
            ArgumentVector::new(&wide(r"C:\a\b.exe"), &wide(r"C:\launch.pyw"), args(&[])).unwrap();

        assert_eq!(argv.argc(), 2);
        assert_eq!(argv.arguments().len(), 2);
    }

    #[test]
    fn interior_nul_is_an_encoding_error() {
        let result = ArgumentVector::new(
            &wide(r"C:\a\b.exe"),
            &wide(r"C:\launch.pyw"),
            args(&["fine", "not\0fine"]),
        );

        assert!(matches!(
            result,
            Err(LaunchError::ArgumentEncoding { index: 3 })
        ));
    }

    #[test]
    fn encoding_errors_use_vector_slots() {
        let script = U16String::from_vec(vec![u16::from(b'a'), 0, u16::from(b'b')]);
        let result = ArgumentVector::new(&wide(r"C:\a\b.exe"), &script, args(&["x"]));
        assert!(matches!(
            result,
            Err(LaunchError::ArgumentEncoding { index: 1 })
        ));

        let result = ArgumentVector::new(
            &wide(r"C:\a\b.exe"),
            &wide(r"C:\launch.pyw"),
            args(&["a\0b"]),
        );
        assert!(matches!(
            result,
            Err(LaunchError::ArgumentEncoding { index: 2 })
        ));
    }

    #[test]
    fn debug_lists_the_arguments() {
        let argv = ArgumentVector::new(&wide(r"C:\a\b.exe"), &wide(r"C:\launch.pyw"), args(&["-v"]))
            .unwrap();

        assert_eq!(
            format!("{argv:?}"),
            r#"["C:\\a\\b.exe", "C:\\launch.pyw", "-v"]"#
        );
    }
}
