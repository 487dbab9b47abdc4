//! Conversion between the Unicode spelling and the two ASCII writing
//! systems: the h-system (ĉ → ch) and the x-system (ĉ → cx).

fn h_system(letter: char) -> Option<&'static str> {
    Some(match letter {
        'ĉ' => "ch",
        'Ĉ' => "Ch",
        'ĝ' => "gh",
        'Ĝ' => "Gh",
        'ĥ' => "hh",
        'Ĥ' => "Hh",
        'ĵ' => "jh",
        'Ĵ' => "Jh",
        'ŝ' => "sh",
        'Ŝ' => "Sh",
        'ŭ' => "u",
        'Ŭ' => "U",
        _ => return None,
    })
}

fn x_system(letter: char) -> Option<&'static str> {
    Some(match letter {
        'ĉ' => "cx",
        'Ĉ' => "Cx",
        'ĝ' => "gx",
        'Ĝ' => "Gx",
        'ĥ' => "hx",
        'Ĥ' => "Hx",
        'ĵ' => "jx",
        'Ĵ' => "Jx",
        'ŝ' => "sx",
        'Ŝ' => "Sx",
        'ŭ' => "ux",
        'Ŭ' => "Ux",
        _ => return None,
    })
}

fn convert(word: &str, table: fn(char) -> Option<&'static str>) -> String {
    let mut output = String::with_capacity(word.len());
    for letter in word.chars() {
        match table(letter) {
            Some(replacement) => output.push_str(replacement),
            None => output.push(letter),
        }
    }
    output
}

pub fn to_h_system(word: &str) -> String {
    convert(word, h_system)
}

pub fn to_x_system(word: &str) -> String {
    convert(word, x_system)
}
