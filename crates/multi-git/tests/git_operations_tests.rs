//! Integration tests for the git facade and the multi-repo branch engine
//!
//! Every test drives real git repositories created in temp directories.

use std::fs;
use std::path::Path;

use git2::Repository;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use multi_fs::NormalizedPath;
use multi_git::{Error, GitRepo, MultiRepoBranchEngine};

fn init_repo(path: &Path) -> Repository {
    fs::create_dir_all(path).unwrap();
    let repo = Repository::init(path).unwrap();
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }
    commit_file(&repo, "README.md", "initial\n", "Initial commit");
    repo
}

fn commit_file(repo: &Repository, name: &str, content: &str, message: &str) {
    let workdir = repo.workdir().unwrap();
    fs::write(workdir.join(name), content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(name)).unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = repo.signature().unwrap();

    let parents = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().unwrap()],
        Err(_) => vec![],
    };
    let parent_refs: Vec<_> = parents.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .unwrap();
}

fn current_branch_of(path: &Path) -> String {
    GitRepo::open(&NormalizedPath::new(path))
        .unwrap()
        .current_branch()
        .unwrap()
}

/// Root plus two member repositories, all with an initial commit.
///
/// Member directories are gitignored in the root the same way a synced
/// workspace ignores them, so the root working tree starts clean.
fn workspace_fixture() -> (TempDir, NormalizedPath, Vec<NormalizedPath>) {
    let temp = TempDir::new().unwrap();
    let root_repo = init_repo(temp.path());
    let members: Vec<NormalizedPath> = ["repo0", "repo1"]
        .iter()
        .map(|name| {
            let path = temp.path().join(name);
            init_repo(&path);
            NormalizedPath::new(&path)
        })
        .collect();
    commit_file(&root_repo, ".gitignore", "repo0/\nrepo1/\n", "Ignore member repos");
    let root = NormalizedPath::new(temp.path());
    (temp, root, members)
}

#[test]
fn test_is_clean_reflects_untracked_files() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());
    let repo = GitRepo::open(&NormalizedPath::new(temp.path())).unwrap();

    assert!(repo.is_clean().unwrap());

    fs::write(temp.path().join("scratch.txt"), "wip").unwrap();
    assert!(!repo.is_clean().unwrap());
}

#[test]
fn test_open_fails_without_git_dir() {
    let temp = TempDir::new().unwrap();
    let err = GitRepo::open(&NormalizedPath::new(temp.path())).unwrap_err();
    assert!(matches!(err, Error::NotARepository { .. }));
}

#[test]
fn test_branch_existence_and_state() {
    let temp = TempDir::new().unwrap();
    let raw = init_repo(temp.path());
    let head_commit = raw.head().unwrap().peel_to_commit().unwrap();
    raw.branch("feature/x", &head_commit, false).unwrap();

    let repo = GitRepo::open(&NormalizedPath::new(temp.path())).unwrap();
    assert!(repo.branch_exists_local("feature/x").unwrap());
    assert!(!repo.branch_exists_local("feature/y").unwrap());

    // No origin configured: remote lookup degrades to "does not exist".
    assert!(!repo.branch_exists_remote("feature/x"));

    let state = repo.branch_state("feature/x").unwrap();
    assert!(state.is_clean);
    assert!(state.exists_locally);
    assert!(!state.exists_remotely);
}

#[test]
fn test_checkout_new_branch_from_head() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());
    let repo = GitRepo::open(&NormalizedPath::new(temp.path())).unwrap();

    repo.checkout_new_branch("feature/x").unwrap();
    assert_eq!(repo.current_branch().unwrap(), "feature/x");
}

#[test]
fn test_checkout_existing_branch() {
    let temp = TempDir::new().unwrap();
    init_repo(temp.path());
    let repo = GitRepo::open(&NormalizedPath::new(temp.path())).unwrap();
    let default_branch = repo.current_branch().unwrap();

    repo.checkout_new_branch("feature/x").unwrap();
    repo.checkout(&default_branch).unwrap();
    assert_eq!(repo.current_branch().unwrap(), default_branch);
}

#[test]
fn test_set_branch_everywhere_creates_and_switches() {
    let (_temp, root, members) = workspace_fixture();
    let engine = MultiRepoBranchEngine::new(root.clone(), members.clone());

    engine.set_branch_everywhere("feature/x").unwrap();

    assert_eq!(current_branch_of(&root.to_native()), "feature/x");
    for member in &members {
        assert_eq!(current_branch_of(&member.to_native()), "feature/x");
    }
    assert!(engine.check_all_on_same_branch().unwrap());
}

#[test]
fn test_set_branch_everywhere_reuses_existing_local_branch() {
    let (_temp, root, members) = workspace_fixture();
    let engine = MultiRepoBranchEngine::new(root.clone(), members.clone());
    let base = current_branch_of(&root.to_native());

    engine.set_branch_everywhere("feature/x").unwrap();
    let repo0 = Repository::open(members[0].to_native()).unwrap();
    commit_file(&repo0, "extra.txt", "x\n", "Feature work");

    engine.set_branch_everywhere(&base).unwrap();
    assert!(!members[0].join("extra.txt").exists());

    // Switching back must reuse the branch, not recreate it from HEAD.
    engine.set_branch_everywhere("feature/x").unwrap();
    assert!(members[0].join("extra.txt").exists());
}

#[test]
fn test_set_branch_pre_flight_gate_is_atomic() {
    let (_temp, root, members) = workspace_fixture();
    let engine = MultiRepoBranchEngine::new(root.clone(), members.clone());

    let before_root = current_branch_of(&root.to_native());
    let before: Vec<String> = members
        .iter()
        .map(|m| current_branch_of(&m.to_native()))
        .collect();

    // Dirty the last member; even the repositories checked before it must
    // stay untouched.
    fs::write(members[1].to_native().join("dirty.txt"), "uncommitted").unwrap();

    let err = engine.set_branch_everywhere("feature/x").unwrap_err();
    assert!(matches!(err, Error::RepoNotClean { .. }));

    assert_eq!(current_branch_of(&root.to_native()), before_root);
    for (member, branch) in members.iter().zip(&before) {
        assert_eq!(&current_branch_of(&member.to_native()), branch);
    }
    let root_repo = GitRepo::open(&root).unwrap();
    assert!(!root_repo.branch_exists_local("feature/x").unwrap());
}

#[test]
fn test_merge_fast_forward() {
    let temp = TempDir::new().unwrap();
    let raw = init_repo(temp.path());
    let repo = GitRepo::open(&NormalizedPath::new(temp.path())).unwrap();
    let base = repo.current_branch().unwrap();

    repo.checkout_new_branch("feature/x").unwrap();
    commit_file(&raw, "feature.txt", "feature\n", "Add feature");
    repo.checkout(&base).unwrap();

    repo.merge("feature/x").unwrap();
    assert!(temp.path().join("feature.txt").exists());
}

#[test]
fn test_merge_conflict_is_reported_and_cleaned_up() {
    let temp = TempDir::new().unwrap();
    let raw = init_repo(temp.path());
    let repo = GitRepo::open(&NormalizedPath::new(temp.path())).unwrap();
    let base = repo.current_branch().unwrap();

    repo.checkout_new_branch("feature/x").unwrap();
    commit_file(&raw, "shared.txt", "feature side\n", "Feature edit");
    repo.checkout(&base).unwrap();
    commit_file(&raw, "shared.txt", "base side\n", "Base edit");

    let err = repo.merge("feature/x").unwrap_err();
    assert!(matches!(err, Error::MergeConflict { .. }));
}

#[test]
fn test_merge_branch_everywhere_requires_existing_branches() {
    let (_temp, root, members) = workspace_fixture();
    let engine = MultiRepoBranchEngine::new(root.clone(), members);

    let target = current_branch_of(&root.to_native());
    let err = engine.merge_branch_everywhere("no-such-branch", &target).unwrap_err();
    assert!(matches!(err, Error::BranchNotFound { name, .. } if name == "no-such-branch"));
}

#[test]
fn test_merge_branch_everywhere_merges_each_repo() {
    let (_temp, root, members) = workspace_fixture();
    let engine = MultiRepoBranchEngine::new(root.clone(), members.clone());
    let base = current_branch_of(&root.to_native());

    engine.set_branch_everywhere("feature/x").unwrap();
    for path in std::iter::once(&root).chain(members.iter()) {
        let raw = Repository::open(path.to_native()).unwrap();
        commit_file(&raw, "feature.txt", "feature\n", "Feature work");
    }
    engine.set_branch_everywhere(&base).unwrap();

    engine.merge_branch_everywhere("feature/x", &base).unwrap();

    for path in std::iter::once(&root).chain(members.iter()) {
        assert_eq!(current_branch_of(&path.to_native()), base);
        assert!(path.join("feature.txt").exists());
    }
}

#[test]
fn test_push_to_local_remote() {
    let temp = TempDir::new().unwrap();
    let bare_path = temp.path().join("origin.git");
    Repository::init_bare(&bare_path).unwrap();

    let work_path = temp.path().join("work");
    let raw = init_repo(&work_path);
    raw.remote("origin", bare_path.to_str().unwrap()).unwrap();

    let repo = GitRepo::open(&NormalizedPath::new(&work_path)).unwrap();
    let branch = repo.current_branch().unwrap();
    repo.push(None).unwrap();

    let bare = Repository::open_bare(&bare_path).unwrap();
    assert!(bare.find_branch(&branch, git2::BranchType::Local).is_ok());
}

#[test]
fn test_check_all_on_same_branch_detects_divergence() {
    let (_temp, root, members) = workspace_fixture();
    let engine = MultiRepoBranchEngine::new(root.clone(), members.clone());
    assert!(engine.check_all_on_same_branch().unwrap());

    let repo1 = GitRepo::open(&members[1]).unwrap();
    repo1.checkout_new_branch("drift").unwrap();
    assert!(!engine.check_all_on_same_branch().unwrap());
}
