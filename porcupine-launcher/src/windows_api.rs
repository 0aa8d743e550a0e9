use std::ffi::CStr;

use widestring::U16CStr;
use widestring::U16CString;
use widestring::U16String;
use windows::core::PCSTR;
use windows::core::PCWSTR;
use windows::Win32::Foundation::HMODULE;
use windows::Win32::Foundation::MAX_PATH;
use windows::Win32::System::LibraryLoader::GetModuleFileNameW;
use windows::Win32::System::LibraryLoader::GetProcAddress;
use windows::Win32::System::LibraryLoader::LoadLibraryW;
use windows::Win32::UI::WindowsAndMessaging::MessageBoxW;
use windows::Win32::UI::WindowsAndMessaging::MB_ICONERROR;
use windows::Win32::UI::WindowsAndMessaging::MB_OK;

use crate::error::LaunchError;
use crate::runtime::EntryPoint;
use crate::runtime::RuntimeLoader;

pub struct WindowsApi;

impl WindowsApi {
    /// Absolute path of the running executable
    pub fn module_file_name() -> Result<U16String, LaunchError> {
        let mut buffer = [0u16; MAX_PATH as usize];
        let length = unsafe { GetModuleFileNameW(None, &mut buffer) } as usize;

        if length == 0 {
            return Err(LaunchError::OwnPathResolution(
                std::io::Error::last_os_error().to_string(),
            ));
        }

        // GetModuleFileNameW truncates without a terminator when the buffer is
        // too small, so a full buffer is a failure too
        if length >= buffer.len() {
            return Err(LaunchError::OwnPathResolution(format!(
                "the path is longer than {} characters",
                buffer.len() - 1
            )));
        }

        Ok(U16String::from_vec(buffer[..length].to_vec()))
    }

    /// Blocks until the user dismisses the alert
    pub fn error_message_box(title: &str, message: &str) {
        let title = U16CString::from_str_truncate(title);
        let message = U16CString::from_str_truncate(message);

        unsafe {
            MessageBoxW(
                None,
                PCWSTR::from_raw(message.as_ptr()),
                PCWSTR::from_raw(title.as_ptr()),
                MB_OK | MB_ICONERROR,
            );
        }
    }
}

impl RuntimeLoader for WindowsApi {
    type Library = HMODULE;

    fn load_library(&self, name: &U16CStr) -> std::io::Result<HMODULE> {
        unsafe { LoadLibraryW(PCWSTR::from_raw(name.as_ptr())) }.map_err(std::io::Error::from)
    }

    fn entry_point(&self, library: &HMODULE, symbol: &CStr) -> Option<EntryPoint> {
        let address = unsafe { GetProcAddress(*library, PCSTR::from_raw(symbol.as_ptr().cast())) }?;

        // SAFETY: the only symbol looked up is Py_Main, whose C signature is
        // `int Py_Main(int, wchar_t **)`
        Some(unsafe {
            std::mem::transmute::<unsafe extern "system" fn() -> isize, EntryPoint>(address)
        })
    }
}
