//! Integration tests for the deevault vault module.

use std::fs;
use std::path::Path;

use deevault::crypto::encrypt;
use deevault::errors::VaultError;
use deevault::vault::{Answer, MemoryFs, Outcome, ScriptedPrompter, VaultFs, VaultStore};
use tempfile::TempDir;

const VAULT: &str = "/home/user/.secrets.json";

/// Helper: a store over a fresh in-memory filesystem.
fn memory_store(fs: &MemoryFs) -> VaultStore<&MemoryFs> {
    VaultStore::with_fs(VAULT, fs)
}

/// Helper: a real vault file path inside a fresh temp dir.
fn vault_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join(".secrets.json");
    (dir, path)
}

/// Helper: put a brand-new name (no prompts expected).
fn put_new<F: VaultFs>(store: &VaultStore<F>, name: &str, value: &str, pass: &str) {
    let outcome = store
        .put(name, value, pass, &mut ScriptedPrompter::silent())
        .expect("put");
    assert_eq!(outcome, Outcome::Done(()));
}

/// Helper: get with the display confirmation answered "yes".
fn get_shown<F: VaultFs>(
    store: &VaultStore<F>,
    name: &str,
    pass: &str,
) -> deevault::errors::Result<String> {
    let mut prompter = ScriptedPrompter::confirming(true);
    let outcome = store.get(name, pass, &mut prompter)?;
    Ok(outcome.done().expect("display confirmed").as_str().to_owned())
}

// ---------------------------------------------------------------------------
// Isolation between entries
// ---------------------------------------------------------------------------

#[test]
fn entries_with_different_passphrases_are_isolated() {
    let mem = MemoryFs::new();
    let store = memory_store(&mem);

    put_new(&store, "a", "secret1", "pass1");
    put_new(&store, "b", "secret2", "pass2");

    assert_eq!(get_shown(&store, "a", "pass1").unwrap(), "secret1");
    assert_eq!(get_shown(&store, "b", "pass2").unwrap(), "secret2");

    // Each passphrase only opens its own entry.
    assert!(matches!(
        get_shown(&store, "a", "pass2"),
        Err(VaultError::Authentication)
    ));
}

#[test]
fn unknown_name_is_not_found() {
    let mem = MemoryFs::new();
    let store = memory_store(&mem);
    put_new(&store, "a", "secret1", "pass1");

    let mut prompter = ScriptedPrompter::silent();
    let result = store.get("c", "pass1", &mut prompter);
    assert!(matches!(result, Err(VaultError::NotFound(ref n)) if n == "c"));
    assert!(prompter.asked().is_empty(), "no display prompt for a miss");
}

#[test]
fn get_on_missing_file_is_not_found() {
    let mem = MemoryFs::new();
    let store = memory_store(&mem);

    let result = store.get("github", "pw", &mut ScriptedPrompter::silent());
    assert!(matches!(result, Err(VaultError::NotFound(_))));
}

// ---------------------------------------------------------------------------
// Put / overwrite confirmation
// ---------------------------------------------------------------------------

#[test]
fn declined_overwrite_keeps_original() {
    let mem = MemoryFs::new();
    let store = memory_store(&mem);
    put_new(&store, "a", "v1", "pass");
    let before = mem.contents(Path::new(VAULT)).unwrap();

    let mut prompter = ScriptedPrompter::confirming(false);
    let outcome = store.put("a", "v2", "pass", &mut prompter).unwrap();

    assert!(outcome.is_aborted());
    assert_eq!(prompter.asked(), ["Secret 'a' already exists. Overwrite?"]);
    assert_eq!(mem.contents(Path::new(VAULT)).unwrap(), before);
    assert_eq!(get_shown(&store, "a", "pass").unwrap(), "v1");
}

#[test]
fn confirmed_overwrite_replaces_value_and_passphrase() {
    let mem = MemoryFs::new();
    let store = memory_store(&mem);
    put_new(&store, "a", "v1", "old-pass");

    let outcome = store
        .put("a", "v2", "new-pass", &mut ScriptedPrompter::confirming(true))
        .unwrap();
    assert_eq!(outcome, Outcome::Done(()));

    assert_eq!(get_shown(&store, "a", "new-pass").unwrap(), "v2");
    assert!(matches!(
        get_shown(&store, "a", "old-pass"),
        Err(VaultError::Authentication)
    ));
    assert_eq!(store.names().unwrap(), ["a"]);
}

#[test]
fn failed_write_leaves_previous_file() {
    let mem = MemoryFs::new();
    let store = memory_store(&mem);
    put_new(&store, "a", "v1", "pass");
    let before = mem.contents(Path::new(VAULT)).unwrap();

    mem.set_fail_writes(true);
    let result = store.put("b", "v2", "pass", &mut ScriptedPrompter::silent());
    assert!(matches!(result, Err(VaultError::Io(_))));

    mem.set_fail_writes(false);
    assert_eq!(mem.contents(Path::new(VAULT)).unwrap(), before);
    assert_eq!(store.names().unwrap(), ["a"]);
}

#[test]
fn put_merges_with_entries_written_by_someone_else() {
    let mem = MemoryFs::new();
    let store = memory_store(&mem);
    put_new(&store, "a", "v1", "pass");

    // Another invocation adds an entry between our calls.
    let other = memory_store(&mem);
    put_new(&other, "b", "v2", "pass");

    put_new(&store, "c", "v3", "pass");
    assert_eq!(store.names().unwrap(), ["a", "b", "c"]);
}

#[test]
fn vault_file_never_contains_plaintext_or_passphrase() {
    let mem = MemoryFs::new();
    let store = memory_store(&mem);
    put_new(&store, "github", "ghp_supersecretvalue", "my-passphrase");

    let text = String::from_utf8(mem.contents(Path::new(VAULT)).unwrap()).unwrap();
    assert!(text.contains("\"github\""));
    assert!(!text.contains("ghp_supersecretvalue"));
    assert!(!text.contains("my-passphrase"));
}

// ---------------------------------------------------------------------------
// Get / display confirmation
// ---------------------------------------------------------------------------

#[test]
fn declined_display_returns_aborted() {
    let mem = MemoryFs::new();
    let store = memory_store(&mem);
    put_new(&store, "a", "v1", "pass");

    let mut prompter = ScriptedPrompter::confirming(false);
    let outcome = store.get("a", "pass", &mut prompter).unwrap();
    assert!(outcome.is_aborted());
    assert_eq!(prompter.asked(), ["Display the decrypted value of 'a'?"]);
}

#[test]
fn wrong_passphrase_on_get_asks_nothing() {
    let mem = MemoryFs::new();
    let store = memory_store(&mem);
    put_new(&store, "a", "v1", "pass");

    let mut prompter = ScriptedPrompter::silent();
    let result = store.get("a", "wrong", &mut prompter);
    assert!(matches!(result, Err(VaultError::Authentication)));
    assert!(prompter.asked().is_empty());
}

#[test]
fn unlock_skips_display_confirmation() {
    let mem = MemoryFs::new();
    let store = memory_store(&mem);
    put_new(&store, "github_token", "ghp_x", "pass");

    assert_eq!(store.unlock("github_token", "pass").unwrap().as_str(), "ghp_x");
    assert!(matches!(
        store.unlock("missing", "pass"),
        Err(VaultError::NotFound(_))
    ));
}

#[test]
fn malformed_envelope_is_format_error() {
    let mem = MemoryFs::new();
    mem.insert(VAULT, r#"{"a": "%%% not base64 %%%"}"#);
    let store = memory_store(&mem);

    let result = store.get("a", "pass", &mut ScriptedPrompter::silent());
    assert!(matches!(result, Err(VaultError::Format(_))));
}

#[test]
fn delete_of_malformed_envelope_fails_authentication() {
    let mem = MemoryFs::new();
    mem.insert(VAULT, r#"{"a": "%%% not base64 %%%"}"#);
    let store = memory_store(&mem);
    let before = mem.contents(Path::new(VAULT)).unwrap();

    let result = store.delete("a", "pass", &mut ScriptedPrompter::confirming(true));
    assert!(matches!(result, Err(VaultError::Authentication)));
    assert_eq!(mem.contents(Path::new(VAULT)).unwrap(), before);
}

// ---------------------------------------------------------------------------
// Keys written outside deevault
// ---------------------------------------------------------------------------

/// Seed the vault with `{name: encrypt(value, pass)}` as another tool would.
fn seed_raw_entry(mem: &MemoryFs, name: &str, value: &str, pass: &str) {
    let doc = serde_json::json!({ name: encrypt(value, pass).unwrap() });
    mem.insert(VAULT, serde_json::to_vec(&doc).unwrap());
}

#[test]
fn empty_name_written_elsewhere_can_be_read_and_deleted() {
    let mem = MemoryFs::new();
    seed_raw_entry(&mem, "", "v", "pw");
    let store = memory_store(&mem);

    assert_eq!(store.names().unwrap(), [""]);
    assert_eq!(get_shown(&store, "", "pw").unwrap(), "v");

    let outcome = store
        .delete("", "pw", &mut ScriptedPrompter::confirming(true))
        .unwrap();
    assert_eq!(outcome, Outcome::Done(()));
    assert!(store.names().unwrap().is_empty());
}

#[test]
fn padded_name_written_elsewhere_is_reachable() {
    let mem = MemoryFs::new();
    seed_raw_entry(&mem, " github ", "ghp_x", "pw");
    let store = memory_store(&mem);

    assert_eq!(store.unlock(" github ", "pw").unwrap().as_str(), "ghp_x");
    assert!(matches!(
        store.unlock("github", "pw"),
        Err(VaultError::NotFound(_))
    ));
}

#[test]
fn put_still_rejects_names_it_would_not_create() {
    let mem = MemoryFs::new();
    let store = memory_store(&mem);

    let result = store.put("", "v", "pw", &mut ScriptedPrompter::silent());
    assert!(matches!(result, Err(VaultError::InvalidName(_))));
    assert!(mem.contents(Path::new(VAULT)).is_none());
}

// ---------------------------------------------------------------------------
// Delete / passphrase proof
// ---------------------------------------------------------------------------

#[test]
fn delete_with_wrong_passphrase_keeps_entry() {
    let mem = MemoryFs::new();
    let store = memory_store(&mem);
    put_new(&store, "a", "secret1", "pass1");

    let mut prompter = ScriptedPrompter::confirming(true);
    let result = store.delete("a", "wrongpass", &mut prompter);
    assert!(matches!(result, Err(VaultError::Authentication)));

    assert_eq!(get_shown(&store, "a", "pass1").unwrap(), "secret1");
}

#[test]
fn delete_with_right_passphrase_removes_entry() {
    let mem = MemoryFs::new();
    let store = memory_store(&mem);
    put_new(&store, "a", "secret1", "pass1");
    put_new(&store, "b", "secret2", "pass2");

    let mut prompter = ScriptedPrompter::confirming(true);
    let outcome = store.delete("a", "pass1", &mut prompter).unwrap();
    assert_eq!(outcome, Outcome::Done(()));
    assert_eq!(prompter.asked(), ["Delete secret 'a'?"]);

    assert!(matches!(
        get_shown(&store, "a", "pass1"),
        Err(VaultError::NotFound(_))
    ));
    assert_eq!(get_shown(&store, "b", "pass2").unwrap(), "secret2");
}

#[test]
fn declined_delete_keeps_entry_without_verifying() {
    let mem = MemoryFs::new();
    let store = memory_store(&mem);
    put_new(&store, "a", "secret1", "pass1");
    let before = mem.contents(Path::new(VAULT)).unwrap();

    // Declining first means even a wrong passphrase is not an error.
    let outcome = store
        .delete("a", "wrongpass", &mut ScriptedPrompter::confirming(false))
        .unwrap();
    assert!(outcome.is_aborted());
    assert_eq!(mem.contents(Path::new(VAULT)).unwrap(), before);
}

#[test]
fn delete_unknown_name_is_not_found_before_prompting() {
    let mem = MemoryFs::new();
    let store = memory_store(&mem);
    put_new(&store, "a", "secret1", "pass1");

    let mut prompter = ScriptedPrompter::silent();
    let result = store.delete("zzz", "pass1", &mut prompter);
    assert!(matches!(result, Err(VaultError::NotFound(_))));
    assert!(prompter.asked().is_empty());
}

#[test]
fn deleting_last_entry_leaves_empty_object() {
    let mem = MemoryFs::new();
    let store = memory_store(&mem);
    put_new(&store, "a", "secret1", "pass1");

    let outcome = store
        .delete("a", "pass1", &mut ScriptedPrompter::confirming(true))
        .unwrap();
    assert_eq!(outcome, Outcome::Done(()));

    assert_eq!(mem.contents(Path::new(VAULT)).unwrap(), b"{}\n");
    assert!(store.names().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Corrupt file handling
// ---------------------------------------------------------------------------

#[test]
fn truncated_file_is_store_corrupt_and_untouched() {
    let mem = MemoryFs::new();
    let store = memory_store(&mem);
    put_new(&store, "a", "secret1", "pass1");

    let full = mem.contents(Path::new(VAULT)).unwrap();
    let fragment = full[..full.len() / 2].to_vec();
    mem.insert(VAULT, fragment.clone());

    assert!(matches!(store.load(), Err(VaultError::StoreCorrupt { .. })));

    // Mutations refuse to run on top of a corrupt file.
    let result = store.put("b", "v", "pass", &mut ScriptedPrompter::silent());
    assert!(matches!(result, Err(VaultError::StoreCorrupt { .. })));
    let result = store.delete("a", "pass1", &mut ScriptedPrompter::silent());
    assert!(matches!(result, Err(VaultError::StoreCorrupt { .. })));

    assert_eq!(mem.contents(Path::new(VAULT)).unwrap(), fragment);
}

#[test]
fn empty_file_is_empty_vault() {
    let mem = MemoryFs::new();
    mem.insert(VAULT, Vec::new());
    let store = memory_store(&mem);

    assert!(store.load().unwrap().is_empty());
    put_new(&store, "a", "v", "pass");
    assert_eq!(store.names().unwrap(), ["a"]);
}

// ---------------------------------------------------------------------------
// Real filesystem
// ---------------------------------------------------------------------------

#[test]
fn real_file_roundtrip_is_readable_json() {
    let (_dir, path) = vault_path();
    let store = VaultStore::new(&path);

    put_new(&store, "github", "ghp_abc", "pass1");
    put_new(&store, "aws", "AKIA123", "pass2");

    // The file is a plain name -> string object.
    let text = fs::read_to_string(&path).unwrap();
    let doc: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&text).unwrap();
    assert_eq!(doc.len(), 2);
    assert!(doc.values().all(|v| v.is_string()));

    // A fresh handle sees the same data.
    let reopened = VaultStore::new(&path);
    assert_eq!(reopened.names().unwrap(), ["aws", "github"]);
    assert_eq!(get_shown(&reopened, "github", "pass1").unwrap(), "ghp_abc");
}

#[test]
fn real_file_corrupt_is_reported_with_path() {
    let (_dir, path) = vault_path();
    fs::write(&path, "{\"github\": ").unwrap();

    let err = VaultStore::new(&path).load().unwrap_err();
    assert!(matches!(err, VaultError::StoreCorrupt { .. }));
    assert!(err.to_string().contains(".secrets.json"));
}

#[test]
fn scripted_sequence_for_overwrite_then_delete() {
    let (_dir, path) = vault_path();
    let store = VaultStore::new(&path);
    put_new(&store, "a", "v1", "pass");

    let mut prompter = ScriptedPrompter::new([Answer::Confirm(true), Answer::Confirm(true)]);
    let put = store.put("a", "v2", "pass", &mut prompter).unwrap();
    let deleted = store.delete("a", "pass", &mut prompter).unwrap();
    assert_eq!(put, Outcome::Done(()));
    assert_eq!(deleted, Outcome::Done(()));

    assert_eq!(prompter.remaining(), 0);
    assert!(store.names().unwrap().is_empty());
}
