//! Recursive traversal over descriptor trees.

use super::Expose;

/// Visits every descriptor in `nodes` depth-first.
///
/// `visit` is invoked on each node, except that composite-shaped nodes at
/// this top level are skipped when `skip_composite_roots` is set. Children
/// are always descended into and always visited; the skip flag never
/// propagates below the entry level. List item descriptors are not children:
/// a list is a leaf whose items the synthesizer handles.
///
/// # Examples
/// ```
/// use zigfix_core::{Expose, walk};
///
/// let tree = vec![Expose::light(vec![
///     Expose::binary("state", "ON", "OFF"),
///     Expose::numeric("brightness", Some(0.0), Some(254.0)),
/// ])];
/// let mut keys = Vec::new();
/// walk(&tree, true, &mut |node: &Expose| keys.push(node.key().map(str::to_owned)));
/// assert_eq!(keys, [Some("state".to_owned()), Some("brightness".to_owned())]);
/// ```
pub fn walk<'a, F>(nodes: &'a [Expose], skip_composite_roots: bool, visit: &mut F)
where
    F: FnMut(&'a Expose),
{
    for node in nodes {
        let children = node.features();
        if !(skip_composite_roots && children.is_some()) {
            visit(node);
        }
        if let Some(children) = children {
            walk(children, false, visit);
        }
    }
}
