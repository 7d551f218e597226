//! Cleanup guarantees for filesystem handles
//!
//! Every test acquires through the provider and asserts that scope exit
//! (drop) leaves no trace on the filesystem, on success and failure paths.

use std::fs;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::PathBuf;
use std::sync::Mutex;

use tempscope::{Descriptor, Provider};

// ---------------------------------------------------------------------------
// 1. Directories
// ---------------------------------------------------------------------------

#[test]
fn dir_with_prefix_t_exists_then_vanishes() {
    let provider = Provider::default();
    let handle = provider
        .acquire(&Descriptor::dir().prefix("t").suffix(""))
        .unwrap();
    let path = handle.path().to_path_buf();

    assert!(path.exists(), "path must exist within the scope");
    assert!(path.is_dir(), "directory descriptor must yield a directory");

    drop(handle);
    assert!(!path.exists(), "path must be gone after scope exit");
}

#[test]
fn dir_contents_are_removed_recursively() {
    let provider = Provider::default();
    let handle = provider.acquire(&Descriptor::dir()).unwrap();
    let path = handle.path().to_path_buf();

    fs::write(path.join("scratch.txt"), b"scratch").unwrap();
    fs::create_dir(path.join("nested")).unwrap();
    fs::write(path.join("nested").join("deep.bin"), [0u8; 64]).unwrap();

    drop(handle);
    assert!(
        !path.exists(),
        "everything written into the directory must be removed with it"
    );
}

// ---------------------------------------------------------------------------
// 2. Files
// ---------------------------------------------------------------------------

#[test]
fn file_write_then_release_removes_it() {
    let provider = Provider::default();
    let handle = provider.acquire(&Descriptor::file()).unwrap();
    let path = handle.path().to_path_buf();

    assert!(path.is_file(), "file descriptor must yield an empty file");
    fs::write(&path, b"payload").unwrap();

    drop(handle);
    assert!(!path.exists(), "file must be absent after scope exit");
}

#[test]
fn file_deleted_by_consumer_does_not_fail_the_scope() {
    let provider = Provider::default();
    let handle = provider.acquire(&Descriptor::file()).unwrap();

    fs::remove_file(handle.path()).unwrap();

    // Scope exit must tolerate the missing file (idempotent cleanup).
    drop(handle);
}

#[test]
fn file_name_carries_prefix_and_suffix() {
    let provider = Provider::default();
    let handle = provider
        .acquire(&Descriptor::file().prefix("pre").suffix(".bin"))
        .unwrap();
    let name = handle.file_name().unwrap().to_string_lossy().into_owned();

    assert!(name.starts_with("pre"), "missing prefix in {name:?}");
    assert!(name.ends_with(".bin"), "missing suffix in {name:?}");
}

// ---------------------------------------------------------------------------
// 3. Failure paths
// ---------------------------------------------------------------------------

#[test]
fn panic_inside_the_scope_still_cleans_up() {
    let provider = Provider::default();
    let observed = Mutex::new(PathBuf::new());

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let handle = provider.acquire(&Descriptor::dir()).unwrap();
        *observed.lock().unwrap() = handle.path().to_path_buf();
        panic!("consumer failed mid-scope");
    }));

    assert!(outcome.is_err());
    let path = observed.lock().unwrap().clone();
    assert!(!path.as_os_str().is_empty(), "scope body must have run");
    assert!(!path.exists(), "unwind must still release the resource");
}

#[test]
fn distinct_acquisitions_never_collide() {
    let provider = Provider::default();
    let desc = Descriptor::dir().prefix("same");

    let first = provider.acquire(&desc).unwrap();
    let second = provider.acquire(&desc).unwrap();

    assert_ne!(
        first.path(),
        second.path(),
        "uncached acquisitions must get unique names"
    );
}
