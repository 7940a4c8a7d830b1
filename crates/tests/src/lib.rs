//! # Integration Tests
//!
//! Cross-crate and end-to-end tests.
//!
//! Covers:
//! - Contract snapshot of the built-in table
//! - Dispatcher on a real directory tree
//! - Real process spawning (serialised, they fork)

#[cfg(test)]
mod contract_tests {
    use contracts::DispatchTable;

    #[test]
    fn test_reference_table_snapshot() {
        let table = DispatchTable::reference();
        assert_eq!(table.abi_tag, "linux-gnu");

        let rows: Vec<_> = table
            .services
            .iter()
            .map(|m| {
                (
                    m.version.as_str(),
                    m.binary.as_str(),
                    m.services_prefix.to_str().unwrap(),
                    m.sdk_candidates
                        .iter()
                        .map(|c| c.to_str().unwrap())
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        assert_eq!(
            rows,
            vec![
                ("1", "eks-search-provider-v1", "/app/eos-knowledge-services/1", vec!["/app/sdk/1", "/app/sdk/0"]),
                ("2", "eks-search-provider-v2", "/app/eos-knowledge-services/2", vec!["/app/sdk/3", "/app/sdk/2"]),
                ("3", "eks-search-provider-v3", "/app/eos-knowledge-services/3", vec!["/app/sdk/5", "/app/sdk/4"]),
            ]
        );
    }
}

#[cfg(test)]
mod fixture {
    use std::fs;
    use std::path::{Path, PathBuf};

    use contracts::{DispatchTable, VersionMapping, DEFAULT_ABI_TAG};

    /// On-disk layout: `root/sdk/{hi,lo}` and `root/services/1`
    pub struct Layout {
        pub root: PathBuf,
    }

    impl Layout {
        pub fn new(root: &Path) -> Self {
            fs::create_dir_all(root.join("services/1/bin")).unwrap();
            Self {
                root: root.to_path_buf(),
            }
        }

        pub fn sdk(&self, name: &str) -> PathBuf {
            self.root.join("sdk").join(name)
        }

        pub fn services_prefix(&self) -> PathBuf {
            self.root.join("services/1")
        }

        pub fn make_empty_sdk(&self, name: &str) -> PathBuf {
            let dir = self.sdk(name);
            fs::create_dir_all(&dir).unwrap();
            dir
        }

        pub fn make_populated_sdk(&self, name: &str) -> PathBuf {
            let dir = self.sdk(name);
            fs::create_dir_all(dir.join("lib")).unwrap();
            fs::write(dir.join("lib/libruntime.so"), b"").unwrap();
            dir
        }

        /// Table with a single version "1" over `hi` then `lo`
        pub fn table(&self) -> DispatchTable {
            DispatchTable {
                abi_tag: DEFAULT_ABI_TAG.to_string(),
                services: vec![VersionMapping::new(
                    "1",
                    [self.sdk("hi"), self.sdk("lo")],
                    "provider",
                    self.services_prefix(),
                )],
            }
        }
    }
}

#[cfg(test)]
mod resolution_tests {
    use std::path::PathBuf;

    use dispatcher::{Dispatcher, DispatcherError, FsDirectoryLister, RecordingSpawner};
    use tempfile::tempdir;

    use crate::fixture::Layout;

    #[test]
    fn test_empty_high_priority_sdk_falls_through() {
        let dir = tempdir().unwrap();
        let layout = Layout::new(dir.path());
        layout.make_empty_sdk("hi");
        let lo = layout.make_populated_sdk("lo");

        let d = Dispatcher::with_parts(layout.table(), FsDirectoryLister, RecordingSpawner::new());
        let spawned = d.dispatch("1", Some("x86_64")).unwrap();

        let prefix = layout.services_prefix();
        assert_eq!(spawned.request.program, prefix.join("bin/provider"));
        assert_eq!(
            spawned.request.ld_library_path,
            format!(
                "{}:{}:{}",
                prefix.join("lib").display(),
                lo.join("lib").display(),
                lo.join("lib/x86_64-linux-gnu").display()
            )
        );
        assert_eq!(d.spawner().requests().len(), 1);
    }

    #[test]
    fn test_populated_high_priority_sdk_wins() {
        let dir = tempdir().unwrap();
        let layout = Layout::new(dir.path());
        let hi = layout.make_populated_sdk("hi");
        layout.make_populated_sdk("lo");

        let d = Dispatcher::with_parts(layout.table(), FsDirectoryLister, RecordingSpawner::new());
        let request = d.plan("1", None).unwrap();

        assert_eq!(
            request.path,
            format!(
                "{}:{}",
                layout.services_prefix().join("bin").display(),
                hi.join("bin").display()
            )
        );
        assert_eq!(request.ld_library_path.split(':').count(), 2);
    }

    #[test]
    fn test_nothing_installed() {
        let dir = tempdir().unwrap();
        let layout = Layout::new(dir.path());
        layout.make_empty_sdk("lo");

        let d = Dispatcher::with_parts(layout.table(), FsDirectoryLister, RecordingSpawner::new());
        let err = d.dispatch("1", None).unwrap_err();

        assert!(matches!(err, DispatcherError::NoCandidateSdk { .. }));
        assert!(d.spawner().requests().is_empty());
    }

    #[test]
    fn test_unknown_version_with_override_table() {
        let dir = tempdir().unwrap();
        let layout = Layout::new(dir.path());
        layout.make_populated_sdk("hi");

        let d = Dispatcher::with_parts(layout.table(), FsDirectoryLister, RecordingSpawner::new());
        let err = d.dispatch("2", None).unwrap_err();

        assert!(matches!(err, DispatcherError::UnknownVersion { ref version } if version == "2"));
        assert_eq!(d.table().services[0].services_prefix, PathBuf::from(layout.services_prefix()));
    }
}

#[cfg(test)]
mod spawn_tests {
    use std::fs::{self, File};
    use std::io::Read;
    use std::os::fd::{FromRawFd, RawFd};
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use std::thread;
    use std::time::Duration;

    use dispatcher::{create_dispatcher, DispatcherError};
    use serial_test::serial;
    use tempfile::tempdir;

    use crate::fixture::Layout;

    /// Service stub that records what it was started with.
    ///
    /// Only shell builtins are used: the child's PATH no longer reaches /bin.
    fn install_stub(program: &Path, report: &Path) {
        let script = format!(
            "#!/bin/sh\n\
             {{\n\
             echo \"$0\"\n\
             echo \"$PATH\"\n\
             echo \"$LD_LIBRARY_PATH\"\n\
             echo \"$XDG_DATA_DIRS\"\n\
             echo \"$#\"\n\
             }} > '{report}'\n\
             : > '{report}.done'\n",
            report = report.display()
        );
        fs::write(program, script).unwrap();
        fs::set_permissions(program, fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Stub that reports `marker` from its environment and writes to `fd`.
    ///
    /// Multi-digit descriptors cannot be named in a `sh` redirection, so the
    /// write goes through `/proc/$$/fd`.
    fn install_inheritance_stub(program: &Path, report: &Path, marker: &str, fd: RawFd) {
        let script = format!(
            "#!/bin/sh\n\
             echo \"${marker}\" > '{report}'\n\
             echo fd-ok > /proc/$$/fd/{fd}\n\
             : > '{report}.done'\n",
            report = report.display()
        );
        fs::write(program, script).unwrap();
        fs::set_permissions(program, fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Pipe whose ends are not close-on-exec.
    fn inheritable_pipe() -> (File, RawFd) {
        let mut fds = [0 as libc::c_int; 2];
        assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
        let reader = unsafe { File::from_raw_fd(fds[0]) };
        (reader, fds[1])
    }

    fn wait_for(path: &Path) -> bool {
        for _ in 0..200 {
            if path.exists() {
                return true;
            }
            thread::sleep(Duration::from_millis(25));
        }
        false
    }

    #[test]
    #[serial]
    fn test_real_spawn_overwrites_search_paths() {
        let dir = tempdir().unwrap();
        let layout = Layout::new(dir.path());
        let lo = layout.make_populated_sdk("lo");
        let prefix = layout.services_prefix();
        let program = prefix.join("bin/provider");
        let report = dir.path().join("report.txt");
        install_stub(&program, &report);

        let spawned = create_dispatcher(layout.table())
            .dispatch("1", Some("aarch64"))
            .unwrap();
        assert!(spawned.pid > 0);

        let done = dir.path().join("report.txt.done");
        assert!(wait_for(&done), "stub never ran");

        let content = fs::read_to_string(&report).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], program.to_str().unwrap());
        assert_eq!(
            lines[1],
            format!("{}:{}", prefix.join("bin").display(), lo.join("bin").display())
        );
        assert_eq!(
            lines[2],
            format!(
                "{}:{}:{}",
                prefix.join("lib").display(),
                lo.join("lib").display(),
                lo.join("lib/aarch64-linux-gnu").display()
            )
        );
        assert_eq!(
            lines[3],
            format!("{}:{}", prefix.join("share").display(), lo.join("share").display())
        );
        // no arguments beyond argv[0]
        assert_eq!(lines[4], "0");
    }

    #[test]
    #[serial]
    fn test_real_spawn_missing_binary() {
        let dir = tempdir().unwrap();
        let layout = Layout::new(dir.path());
        layout.make_populated_sdk("hi");

        let err = create_dispatcher(layout.table())
            .dispatch("1", None)
            .unwrap_err();

        match err {
            DispatcherError::Spawn { program, source } => {
                assert_eq!(program, layout.services_prefix().join("bin/provider"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn test_real_spawn_inherits_environment_and_fds() {
        const MARKER: &str = "EKS_DISPATCHER_INHERITED_MARKER";

        let dir = tempdir().unwrap();
        let layout = Layout::new(dir.path());
        layout.make_populated_sdk("hi");
        let program = layout.services_prefix().join("bin/provider");
        let report = dir.path().join("report.txt");

        let (mut reader, write_fd) = inheritable_pipe();
        install_inheritance_stub(&program, &report, MARKER, write_fd);
        std::env::set_var(MARKER, "from-parent");

        let result = create_dispatcher(layout.table()).dispatch("1", None);

        std::env::remove_var(MARKER);
        unsafe { libc::close(write_fd) };
        result.unwrap();

        let done = dir.path().join("report.txt.done");
        assert!(wait_for(&done), "stub never ran");

        assert_eq!(fs::read_to_string(&report).unwrap(), "from-parent\n");

        let mut buf = [0u8; 16];
        let n = reader.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"fd-ok\n");
    }
}
