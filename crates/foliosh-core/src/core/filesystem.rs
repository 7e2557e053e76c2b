use std::collections::HashMap;

use crate::models::Site;

/// Content that is computed when a file is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Producer {
    /// The backend "about" document (asynchronous)
    About,
    /// The contact card built from site data
    Contact,
}

/// What a file yields when read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileContent {
    Static(String),
    Produced(Producer),
}

/// A node in the virtual tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    File(FileContent),
    Directory(HashMap<String, Node>),
}

impl Node {
    pub fn is_directory(&self) -> bool {
        matches!(self, Node::Directory(_))
    }

    fn text(content: impl Into<String>) -> Self {
        Node::File(FileContent::Static(content.into()))
    }
}

/// Directory entry returned by list_dir
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Read-only virtual filesystem browsed by `cd`, `ls` and `cat`.
///
/// # Path Convention
///
/// - Paths are absolute and start with `/`; the root is `"/"`
/// - No trailing slash except on the root
/// - `~` and `~/...` are root-relative
#[derive(Clone, Debug)]
pub struct VirtualFs {
    root: Node,
}

impl VirtualFs {
    /// Build the tree from site data.
    ///
    /// ```text
    /// /about.txt            produced by the backend
    /// /contact.txt          produced contact card
    /// /quotes.txt
    /// /projects/<slug>.txt
    /// /mycode/<name>
    /// ```
    pub fn from_site(site: &Site) -> Self {
        let mut tree: HashMap<String, Node> = HashMap::new();

        tree.insert(
            "about.txt".to_string(),
            Node::File(FileContent::Produced(Producer::About)),
        );
        tree.insert(
            "contact.txt".to_string(),
            Node::File(FileContent::Produced(Producer::Contact)),
        );
        tree.insert("quotes.txt".to_string(), Node::text(site.quotes_text()));

        // Present even when there are no projects
        tree.entry("projects".to_string())
            .or_insert_with(|| Node::Directory(HashMap::new()));
        for project in &site.projects {
            let path = format!("projects/{}", project.file_name());
            Self::insert_path(&mut tree, &path, Node::text(project.to_file_text()));
        }

        for sample in &site.code {
            let path = format!("mycode/{}", sample.name);
            Self::insert_path(&mut tree, &path, Node::text(sample.content.clone()));
        }

        Self {
            root: Node::Directory(tree),
        }
    }

    /// Insert a node at a relative path, creating parent directories.
    fn insert_path(tree: &mut HashMap<String, Node>, path: &str, node: Node) {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((last, parents)) = parts.split_last() else {
            return;
        };

        let mut current = tree;
        for part in parents {
            let entry = current
                .entry(part.to_string())
                .or_insert_with(|| Node::Directory(HashMap::new()));

            current = match entry {
                Node::Directory(children) => children,
                Node::File(_) => {
                    tracing::warn!(path, blocked_by = *part, "site conflict: file blocks directory");
                    return;
                }
            };
        }

        current.insert(last.to_string(), node);
    }

    /// Resolve `path` against `cwd` into a normalized absolute path.
    ///
    /// Never fails: `..` above the root stays at the root.
    pub fn resolve_path(path: &str, cwd: &str) -> String {
        let effective = if path == "~" {
            "/".to_string()
        } else if let Some(rest) = path.strip_prefix("~/") {
            format!("/{}", rest)
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("{}/{}", cwd, path)
        };

        let mut parts: Vec<&str> = Vec::new();
        for part in effective.split('/').filter(|s| !s.is_empty()) {
            match part {
                ".." => {
                    parts.pop();
                }
                "." => {}
                _ => parts.push(part),
            }
        }

        format!("/{}", parts.join("/"))
    }

    /// Look up the node at `path` (resolved against `cwd`).
    ///
    /// Returns `None` on a missing segment or when a file is traversed as a
    /// directory.
    pub fn get_node(&self, path: &str, cwd: &str) -> Option<&Node> {
        let resolved = Self::resolve_path(path, cwd);
        let mut current = &self.root;

        for part in resolved.split('/').filter(|s| !s.is_empty()) {
            match current {
                Node::Directory(children) => current = children.get(part)?,
                Node::File(_) => return None,
            }
        }

        Some(current)
    }

    /// Check if a path is a directory.
    pub fn is_directory(&self, path: &str, cwd: &str) -> bool {
        self.get_node(path, cwd).is_some_and(Node::is_directory)
    }

    /// List a directory.
    ///
    /// Sorted: directories first, then regular files, then hidden files;
    /// alphabetical within each group.
    pub fn list_dir(&self, path: &str, cwd: &str) -> Option<Vec<DirEntry>> {
        let Node::Directory(children) = self.get_node(path, cwd)? else {
            return None;
        };

        let mut items: Vec<DirEntry> = children
            .iter()
            .map(|(name, node)| DirEntry {
                name: name.clone(),
                is_dir: node.is_directory(),
            })
            .collect();

        items.sort_by(|a, b| {
            let a_hidden = a.name.starts_with('.');
            let b_hidden = b.name.starts_with('.');
            b.is_dir
                .cmp(&a.is_dir)
                .then(a_hidden.cmp(&b_hidden))
                .then_with(|| a.name.cmp(&b.name))
        });
        Some(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_fs() -> VirtualFs {
        VirtualFs::from_site(&Site::embedded().unwrap())
    }

    #[test]
    fn test_resolve_relative() {
        assert_eq!(VirtualFs::resolve_path("projects", "/"), "/projects");
        assert_eq!(VirtualFs::resolve_path("a.txt", "/projects"), "/projects/a.txt");
        assert_eq!(VirtualFs::resolve_path("./x/../y", "/a"), "/a/y");
    }

    #[test]
    fn test_resolve_absolute_overrides_cwd() {
        assert_eq!(VirtualFs::resolve_path("/mycode", "/projects"), "/mycode");
    }

    #[test]
    fn test_resolve_strips_slashes() {
        assert_eq!(VirtualFs::resolve_path("projects/", "/"), "/projects");
        assert_eq!(VirtualFs::resolve_path("//projects///x//", "/"), "/projects/x");
        assert_eq!(VirtualFs::resolve_path("/", "/projects"), "/");
    }

    #[test]
    fn test_resolve_home() {
        assert_eq!(VirtualFs::resolve_path("~", "/projects"), "/");
        assert_eq!(VirtualFs::resolve_path("~/mycode", "/projects"), "/mycode");
    }

    #[test]
    fn test_parent_above_root_clamps() {
        assert_eq!(VirtualFs::resolve_path("..", "/"), "/");
        assert_eq!(VirtualFs::resolve_path("../../..", "/projects"), "/");
        assert_eq!(VirtualFs::resolve_path("../../mycode", "/projects"), "/mycode");
    }

    #[test]
    fn test_resolve_idempotent() {
        let cases = [
            ("..", "/"),
            ("projects/../mycode/./", "/"),
            ("~/a/b/..", "/x"),
            ("../..", "/a/b/c"),
            ("x//y/", "/p"),
        ];
        for (path, cwd) in cases {
            let once = VirtualFs::resolve_path(path, cwd);
            assert_eq!(VirtualFs::resolve_path(&once, "/"), once, "{path} from {cwd}");
        }
    }

    #[test]
    fn test_get_node_root_parent() {
        let fs = create_test_fs();
        let node = fs.get_node("..", "/").unwrap();
        assert!(node.is_directory());
        assert_eq!(node, fs.get_node("/", "/").unwrap());
    }

    #[test]
    fn test_get_node_through_file() {
        let fs = create_test_fs();
        assert!(fs.get_node("quotes.txt", "/").is_some());
        assert!(fs.get_node("quotes.txt/more", "/").is_none());
        assert!(fs.get_node("nonexistent", "/").is_none());
    }

    #[test]
    fn test_produced_files() {
        let fs = create_test_fs();
        assert_eq!(
            fs.get_node("/about.txt", "/"),
            Some(&Node::File(FileContent::Produced(Producer::About)))
        );
        assert_eq!(
            fs.get_node("../contact.txt", "/projects"),
            Some(&Node::File(FileContent::Produced(Producer::Contact)))
        );
    }

    #[test]
    fn test_project_files() {
        let fs = create_test_fs();
        let Some(Node::File(FileContent::Static(text))) =
            fs.get_node("project-alpha.txt", "/projects")
        else {
            panic!("project file missing");
        };
        assert!(text.starts_with("Title: Project Alpha\n"));
    }

    #[test]
    fn test_list_dir_sorting() {
        let fs = create_test_fs();
        let names: Vec<String> = fs
            .list_dir("/", "/")
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(
            names,
            vec!["mycode", "projects", "about.txt", "contact.txt", "quotes.txt"]
        );
        assert!(fs.list_dir("quotes.txt", "/").is_none());
    }

    #[test]
    fn test_hidden_sorted_last() {
        let mut tree = HashMap::new();
        VirtualFs::insert_path(&mut tree, ".secret", Node::text(""));
        VirtualFs::insert_path(&mut tree, "b.txt", Node::text(""));
        VirtualFs::insert_path(&mut tree, "a/x", Node::text(""));
        let fs = VirtualFs {
            root: Node::Directory(tree),
        };
        let names: Vec<String> = fs.list_dir("/", "/").unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["a", "b.txt", ".secret"]);
    }

    #[test]
    fn test_insert_conflict_skipped() {
        let mut tree = HashMap::new();
        VirtualFs::insert_path(&mut tree, "notes", Node::text("file"));
        VirtualFs::insert_path(&mut tree, "notes/inner.txt", Node::text("lost"));
        assert_eq!(tree.get("notes"), Some(&Node::text("file")));
    }

    #[test]
    fn test_is_directory() {
        let fs = create_test_fs();
        assert!(fs.is_directory("projects", "/"));
        assert!(fs.is_directory("..", "/projects"));
        assert!(!fs.is_directory("quotes.txt", "/"));
    }
}
