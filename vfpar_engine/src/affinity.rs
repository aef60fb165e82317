//! Best-effort CPU pinning for worker threads.
//!
//! Only Linux is supported. Everywhere else [`pin_current_thread`] reports
//! [`AffinityError::Unsupported`] and the caller carries on unpinned.

use crate::error::AffinityError;

/// Pin the calling thread to `cpu`.
///
/// # Errors
/// Returns [`AffinityError`] if the CPU index is out of range, the OS refuses
/// the request, or the platform has no pinning support.
#[cfg(target_os = "linux")]
pub fn pin_current_thread(cpu: usize) -> Result<(), AffinityError> {
    let max = libc::CPU_SETSIZE as usize;
    if cpu >= max {
        return Err(AffinityError::OutOfRange { cpu, max });
    }

    // SAFETY: `set` is a plain bitmask owned by this frame, `cpu` was bounds
    // checked against CPU_SETSIZE above, and pid 0 targets the calling thread.
    let rc = unsafe {
        let mut set: libc::cpu_set_t = std::mem::zeroed();
        libc::CPU_ZERO(&mut set);
        libc::CPU_SET(cpu, &mut set);
        libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set)
    };

    if rc == 0 {
        Ok(())
    } else {
        Err(AffinityError::Os {
            cpu,
            source: std::io::Error::last_os_error(),
        })
    }
}

/// Pin the calling thread to `cpu`.
///
/// # Errors
/// Always returns [`AffinityError::Unsupported`] on this platform.
#[cfg(not(target_os = "linux"))]
pub const fn pin_current_thread(_cpu: usize) -> Result<(), AffinityError> {
    Err(AffinityError::Unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "linux")]
    #[test]
    fn out_of_range_cpu_is_rejected() {
        let err = pin_current_thread(usize::MAX).unwrap_err();
        assert!(matches!(err, AffinityError::OutOfRange { .. }));
    }

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn unsupported_platform_reports_unsupported() {
        assert!(matches!(
            pin_current_thread(0),
            Err(AffinityError::Unsupported)
        ));
    }

    #[test]
    fn failure_is_not_fatal_for_the_thread() {
        // Whatever the outcome, the thread keeps running normally.
        let handle = std::thread::spawn(|| {
            let _ = pin_current_thread(0);
            21 * 2
        });
        assert_eq!(handle.join().unwrap(), 42);
    }
}
