//! Fixed US-QWERTY key adjacency, used to pick plausible typo substitutes.

/// Physical neighbors of a lowercase key. Only letter keys and the space bar
/// are mapped; digits and punctuation appear as neighbor values but are never
/// lookup keys themselves.
fn base_neighbors(key: char) -> &'static [char] {
    match key {
        'q' => &['w', 'a', '1'],
        'w' => &['q', 'e', 'a', 's', '2'],
        'e' => &['w', 'r', 's', 'd', '3'],
        'r' => &['e', 't', 'd', 'f', '4'],
        't' => &['r', 'y', 'f', 'g', '5'],
        'y' => &['t', 'u', 'g', 'h', '6'],
        'u' => &['y', 'i', 'h', 'j', '7'],
        'i' => &['u', 'o', 'j', 'k', '8'],
        'o' => &['i', 'p', 'k', 'l', '9'],
        'p' => &['o', '[', 'l', ';', '0'],
        'a' => &['q', 'w', 's', 'z'],
        's' => &['w', 'e', 'a', 'd', 'z', 'x'],
        'd' => &['e', 'r', 's', 'f', 'x', 'c'],
        'f' => &['r', 't', 'd', 'g', 'c', 'v'],
        'g' => &['t', 'y', 'f', 'h', 'v', 'b'],
        'h' => &['y', 'u', 'g', 'j', 'b', 'n'],
        'j' => &['u', 'i', 'h', 'k', 'n', 'm'],
        'k' => &['i', 'o', 'j', 'l', 'm', ','],
        'l' => &['o', 'p', 'k', ';', ',', '.'],
        'z' => &['a', 's', 'x'],
        'x' => &['z', 's', 'd', 'c'],
        'c' => &['x', 'd', 'f', 'v'],
        'v' => &['c', 'f', 'g', 'b'],
        'b' => &['v', 'g', 'h', 'n'],
        'n' => &['b', 'h', 'j', 'm'],
        'm' => &['n', 'j', 'k', ','],
        ' ' => &['c', 'v', 'b', 'n', 'm'],
        _ => &[],
    }
}

/// Neighbors of `key`, preserving its case: an uppercase letter yields
/// uppercase substitutes so an injected typo matches the shift state of the
/// key it replaces. Characters without an entry return an empty list and
/// callers skip typo injection for them.
pub fn nearby_keys(key: char) -> Vec<char> {
    let base = base_neighbors(key.to_ascii_lowercase());
    if key.is_ascii_uppercase() {
        base.iter().map(|key| key.to_ascii_uppercase()).collect()
    } else {
        base.to_vec()
    }
}
