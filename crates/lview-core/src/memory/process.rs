use crate::error::{Error, Result};
#[cfg(target_os = "windows")]
use tracing::debug;

/// Executable name of the game client
pub const DEFAULT_PROCESS_NAME: &str = "League of Legends.exe";

/// An open handle to the game process
pub struct ProcessHandle {
    pub pid: u32,
    pub base_address: u64,
    #[cfg(target_os = "windows")]
    handle: windows::Win32::Foundation::HANDLE,
}

#[cfg(target_os = "windows")]
impl ProcessHandle {
    /// Find the game by executable name and open it for reading
    pub fn find_and_open(process_name: &str) -> Result<Self> {
        let pid = find_process_id(process_name)?;
        Self::open(pid)
    }

    pub fn open(pid: u32) -> Result<Self> {
        use windows::Win32::System::Threading::{
            OpenProcess, PROCESS_QUERY_INFORMATION, PROCESS_VM_READ,
        };

        // SAFETY: OpenProcess has no memory-safety preconditions; failure is
        // reported through the returned Result.
        let handle = unsafe { OpenProcess(PROCESS_VM_READ | PROCESS_QUERY_INFORMATION, false, pid) }
            .map_err(|e| Error::ProcessOpenFailed(format!("pid {}: {}", pid, e)))?;

        // Dropping `process` on error closes the handle.
        let mut process = Self {
            pid,
            base_address: 0,
            handle,
        };
        process.base_address = main_module_base(pid)?;
        debug!("Opened process {} (base: {:#x})", pid, process.base_address);

        Ok(process)
    }

    pub fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;

        let mut buffer = vec![0u8; size];
        let mut bytes_read = 0usize;

        // SAFETY: `buffer` is valid for `size` bytes and outlives the call;
        // `bytes_read` is a valid out pointer.
        unsafe {
            ReadProcessMemory(
                self.handle,
                address as usize as *const std::ffi::c_void,
                buffer.as_mut_ptr().cast(),
                size,
                Some(&mut bytes_read as *mut usize),
            )
        }
        .map_err(|e| Error::read_failed(address, e.to_string()))?;

        if bytes_read != size {
            return Err(Error::read_failed(
                address,
                format!("read {} of {} bytes", bytes_read, size),
            ));
        }

        Ok(buffer)
    }
}

#[cfg(target_os = "windows")]
impl Drop for ProcessHandle {
    fn drop(&mut self) {
        use windows::Win32::Foundation::CloseHandle;

        if !self.handle.is_invalid() {
            // SAFETY: the handle was returned by OpenProcess and is closed once.
            unsafe {
                let _ = CloseHandle(self.handle);
            }
        }
    }
}

#[cfg(target_os = "windows")]
fn find_process_id(process_name: &str) -> Result<u32> {
    use windows::Win32::Foundation::CloseHandle;
    use windows::Win32::System::Diagnostics::ToolHelp::{
        CreateToolhelp32Snapshot, PROCESSENTRY32W, Process32FirstW, Process32NextW,
        TH32CS_SNAPPROCESS,
    };

    // SAFETY: snapshot APIs only write into the entry struct we own, whose
    // dwSize is initialized as the API requires.
    unsafe {
        let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0)
            .map_err(|e| Error::ProcessNotFound(format!("snapshot failed: {}", e)))?;

        let mut entry = PROCESSENTRY32W {
            dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
            ..Default::default()
        };

        let mut found = None;
        if Process32FirstW(snapshot, &mut entry).is_ok() {
            loop {
                if wide_to_string(&entry.szExeFile).eq_ignore_ascii_case(process_name) {
                    found = Some(entry.th32ProcessID);
                    break;
                }
                if Process32NextW(snapshot, &mut entry).is_err() {
                    break;
                }
            }
        }
        let _ = CloseHandle(snapshot);

        found.ok_or_else(|| Error::ProcessNotFound(process_name.to_string()))
    }
}

#[cfg(target_os = "windows")]
fn main_module_base(pid: u32) -> Result<u64> {
    use windows::Win32::Foundation::CloseHandle;
    use windows::Win32::System::Diagnostics::ToolHelp::{
        CreateToolhelp32Snapshot, MODULEENTRY32W, Module32FirstW, TH32CS_SNAPMODULE,
        TH32CS_SNAPMODULE32,
    };

    // SAFETY: see find_process_id.
    unsafe {
        let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPMODULE | TH32CS_SNAPMODULE32, pid)
            .map_err(|e| Error::ProcessOpenFailed(format!("module snapshot failed: {}", e)))?;

        let mut entry = MODULEENTRY32W {
            dwSize: std::mem::size_of::<MODULEENTRY32W>() as u32,
            ..Default::default()
        };

        // The first module of a process is its executable.
        let result = Module32FirstW(snapshot, &mut entry)
            .map(|_| entry.modBaseAddr as u64)
            .map_err(|e| Error::ProcessOpenFailed(format!("main module not found: {}", e)));
        let _ = CloseHandle(snapshot);
        result
    }
}

#[cfg(target_os = "windows")]
fn wide_to_string(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..len])
}

#[cfg(not(target_os = "windows"))]
impl ProcessHandle {
    pub fn find_and_open(process_name: &str) -> Result<Self> {
        Err(Error::ProcessNotFound(format!(
            "{} (process access is only supported on Windows)",
            process_name
        )))
    }

    pub fn open(pid: u32) -> Result<Self> {
        Err(Error::ProcessOpenFailed(format!(
            "pid {} (process access is only supported on Windows)",
            pid
        )))
    }

    pub fn read_bytes(&self, address: u64, _size: usize) -> Result<Vec<u8>> {
        Err(Error::read_failed(address, "unsupported platform"))
    }
}
