use crate::avl_tree::node::Node;
use std::cmp::Ordering;

pub type Tree<T> = Option<Box<Node<T>>>;

/// Returns the height of a subtree, where an absent subtree has height -1 and a
/// leaf has height 0.
pub fn height<T>(tree: &Tree<T>) -> i32 {
    match tree {
        None => -1,
        Some(ref node) => node.height,
    }
}

fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    node.update();
    child.left = Some(node);
    child.update();
    child
}

fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    node.update();
    child.right = Some(node);
    child.update();
    child
}

// Recomputes the subtree root's height and restores the balance invariant.
// Assumes both child subtrees are balanced and that at most one insertion or
// removal happened below since the invariant last held, so the balance factor
// is within [-2, 2]. The single versus double rotation is selected by the sign
// of the taller child's balance factor.
fn balance<T>(tree: &mut Tree<T>) {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return,
    };

    node.update();

    if node.balance() > 1 {
        if let Some(child) = node.left.take() {
            if child.balance() < 0 {
                node.left = Some(rotate_left(child));
            } else {
                node.left = Some(child);
            }
        }
        node = rotate_right(node);
    } else if node.balance() < -1 {
        if let Some(child) = node.right.take() {
            if child.balance() > 0 {
                node.right = Some(rotate_right(child));
            } else {
                node.right = Some(child);
            }
        }
        node = rotate_left(node);
    }

    *tree = Some(node);
}

// precondition: there exists a minimum node in the tree
//
// Every node on the walked path is rebalanced on the way back up, so the caller
// receives a tree that satisfies the balance invariant at every level.
fn remove_min<T>(tree: &mut Tree<T>) -> Box<Node<T>> {
    let min = match tree {
        Some(ref mut node) if node.left.is_some() => remove_min(&mut node.left),
        _ => match tree.take() {
            Some(mut node) => {
                *tree = node.right.take();
                return node;
            },
            None => unreachable!(),
        },
    };

    balance(tree);
    min
}

// Replaces a removed two-child node with its successor: the minimum of the
// right subtree, never the maximum of the left.
fn combine_subtrees<T>(left_tree: Tree<T>, mut right_tree: Tree<T>) -> Tree<T> {
    let mut new_root = remove_min(&mut right_tree);
    new_root.left = left_tree;
    new_root.right = right_tree;
    Some(new_root)
}

/// Inserts a value into the subtree, rebalancing every node on the insertion
/// path. Returns `true` if the value was inserted and `false` if it was already
/// present; a duplicate leaves the tree untouched.
pub fn insert<T>(tree: &mut Tree<T>, value: T) -> bool
where
    T: Ord,
{
    let inserted = match tree {
        Some(ref mut node) => match value.cmp(&node.value) {
            Ordering::Less => insert(&mut node.left, value),
            Ordering::Greater => insert(&mut node.right, value),
            Ordering::Equal => return false,
        },
        None => {
            *tree = Some(Box::new(Node::new(value)));
            return true;
        },
    };

    balance(tree);
    inserted
}

/// Removes a value from the subtree, rebalancing every node on the removal
/// path. Returns the removed value, or `None` if it was not present.
pub fn remove<T>(tree: &mut Tree<T>, value: &T) -> Option<T>
where
    T: Ord,
{
    let ret = match tree.take() {
        Some(mut node) => match value.cmp(&node.value) {
            Ordering::Less => {
                let ret = remove(&mut node.left, value);
                *tree = Some(node);
                ret
            },
            Ordering::Greater => {
                let ret = remove(&mut node.right, value);
                *tree = Some(node);
                ret
            },
            Ordering::Equal => {
                let Node {
                    value: removed,
                    left,
                    right,
                    ..
                } = *node;
                match (left, right) {
                    (None, right) => *tree = right,
                    (left, None) => *tree = left,
                    (left, right) => *tree = combine_subtrees(left, right),
                }
                Some(removed)
            },
        },
        None => return None,
    };

    balance(tree);
    ret
}

pub fn contains<T>(tree: &Tree<T>, value: &T) -> bool
where
    T: Ord,
{
    match tree {
        None => false,
        Some(ref node) => match value.cmp(&node.value) {
            Ordering::Less => contains(&node.left, value),
            Ordering::Greater => contains(&node.right, value),
            Ordering::Equal => true,
        },
    }
}

pub fn min<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.value
    })
}

pub fn max<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.value
    })
}
