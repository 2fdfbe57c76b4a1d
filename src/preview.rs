use crate::{
    errors::EntryKind,
    plan::{Plan, PlannedAction},
};
use colored::Colorize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Represents a node in the tree (either file or directory).
#[derive(Debug)]
struct TreeNode {
    name: String,
    children: Vec<Rc<RefCell<TreeNode>>>,
    kind: EntryKind,
    action: Option<PlannedAction>,
}
impl TreeNode {
    fn new(name: String, kind: EntryKind) -> Self {
        Self {
            name,
            children: Vec::new(),
            kind,
            action: None,
        }
    }
}

/// Build the directory tree from the plan entries, returning the root node.
///
/// Parents that are not planned themselves (`src` for `src/hooks`) are added as plain nodes.
fn build_tree(plan: &Plan, root: &Path) -> Rc<RefCell<TreeNode>> {
    let root_name = root
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| root.display().to_string());

    let tree_root = Rc::new(RefCell::new(TreeNode::new(root_name, EntryKind::Directory)));

    // keyed by path relative to the project root, the root itself is the empty path
    let mut lookup: HashMap<PathBuf, Rc<RefCell<TreeNode>>> = HashMap::new();
    lookup.insert(PathBuf::new(), Rc::clone(&tree_root));

    for entry in &plan.entries {
        let mut current = PathBuf::new();
        let mut parent_node = Rc::clone(&tree_root);
        let segments: Vec<_> = entry.path.components().collect();

        for (index, segment) in segments.iter().enumerate() {
            current.push(segment);

            let is_leaf = index + 1 == segments.len();

            let node = match lookup.get(&current) {
                Some(node) => Rc::clone(node),
                None => {
                    let kind = if is_leaf {
                        entry.kind
                    } else {
                        EntryKind::Directory
                    };
                    let name = segment.as_os_str().to_string_lossy().to_string();
                    let node = Rc::new(RefCell::new(TreeNode::new(name, kind)));

                    parent_node.borrow_mut().children.push(Rc::clone(&node));
                    lookup.insert(current.clone(), Rc::clone(&node));

                    node
                }
            };

            if is_leaf {
                node.borrow_mut().action = Some(entry.action.clone());
            }

            parent_node = node;
        }
    }

    tree_root
}

fn describe(action: &PlannedAction) -> String {
    match action {
        PlannedAction::Create => "new".green().to_string(),
        PlannedAction::Keep => "exists".dimmed().to_string(),
        PlannedAction::Copy { from } => format!("{} {}", "copy from".green(), from.display()),
        PlannedAction::Overwrite { from } => {
            format!("{} {}", "overwrite from".yellow(), from.display())
        }
        PlannedAction::Skip { from } => {
            format!("{} {} {}", "skip,".dimmed(), from.display(), "missing".dimmed())
        }
        PlannedAction::AlreadyInPlace => "in place".dimmed().to_string(),
    }
}

/// Render the tree with a nice ASCII style.
fn render_node(node: &Rc<RefCell<TreeNode>>, prefix: &str, is_last: bool, out: &mut Vec<String>) {
    let node_borrow = node.borrow();

    let connector = if is_last {
        "└── ".yellow()
    } else {
        "├── ".yellow()
    };
    let name = match node_borrow.kind {
        EntryKind::File => node_borrow.name.green(),
        EntryKind::Directory => node_borrow.name.blue(),
    };
    let note = node_borrow
        .action
        .as_ref()
        .map(|action| format!(" ({})", describe(action)))
        .unwrap_or_default();

    out.push(format!("{}{}{}{}", prefix.yellow(), connector, name, note));

    let child_prefix = if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let len = node_borrow.children.len();
    for (i, child) in node_borrow.children.iter().enumerate() {
        let last = i == len - 1;
        render_node(child, &child_prefix, last, out);
    }
}

/// Lines of the tree for `plan` rooted at `root`, without the surrounding banner.
pub fn render_tree(plan: &Plan, root: &Path) -> Vec<String> {
    let tree_root = build_tree(plan, root);

    let mut lines = Vec::new();
    render_node(&tree_root, "", true, &mut lines);

    lines
}

pub fn preview_as_tree(plan: &Plan, root: &Path) {
    println!(
        "Legend: {} = (directory), {} = (file)",
        "blue".blue(),
        "green".green()
    );

    let fancy_prompt = format!(
        "{} {}\n",
        "┌─".bold().bright_blue(),
        "Dry run".bold().bright_blue(),
    );

    println!("{}", fancy_prompt);

    for line in render_tree(plan, root) {
        println!("{}", line);
    }

    let footer = if plan.is_noop() {
        "Nothing to do, the project is already scaffolded"
    } else {
        "Run again without --dry-run to apply"
    };

    println!("\n{} {}", "└─".bold().bright_blue(), footer.bright_green());
}
