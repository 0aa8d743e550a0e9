use std::ffi::CStr;
use std::os::raw::c_int;

use widestring::U16CStr;

/// `int Py_Main(int argc, wchar_t **argv)`
pub type EntryPoint = unsafe extern "C" fn(argc: c_int, argv: *mut *mut u16) -> c_int;

/// The dynamic loader the launcher hands control through.
///
/// An entry point can only be looked up in a [`RuntimeLoader::Library`], and
/// a library only exists once [`RuntimeLoader::load_library`] has succeeded,
/// so nothing can be invoked after a failed load.
pub trait RuntimeLoader {
    type Library;

    fn load_library(&self, name: &U16CStr) -> std::io::Result<Self::Library>;

    fn entry_point(&self, library: &Self::Library, symbol: &CStr) -> Option<EntryPoint>;
}
