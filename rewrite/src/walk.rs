use txtfmt::Inline;

/// Call `f` on the children of every span directly in `list`.
pub(crate) fn each_child_list<F>(list: &mut [Inline], mut f: F)
where
    F: FnMut(&mut Vec<Inline>),
{
    for inline in list {
        if let Some(children) = inline.children_mut() {
            f(children);
        }
    }
}

pub(crate) fn prev_non_space(list: &[Inline], idx: usize) -> Option<usize> {
    list[..idx].iter().rposition(|inline| !inline.is_space())
}

pub(crate) fn next_non_space(list: &[Inline], idx: usize) -> Option<usize> {
    list.get(idx + 1..)?
        .iter()
        .position(|inline| !inline.is_space())
        .map(|pos| idx + 1 + pos)
}
