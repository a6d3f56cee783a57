#[macro_export]
macro_rules! true_false_color {
    ($a: expr) => {
        if $a {
            $crate::consts::GREEN_COL
        } else {
            $crate::consts::RED_COL
        }
    };
}

// step text marks the things to touch with **bold**; egui labels are plain
pub fn plain_text(s: &str) -> String {
    s.replace("**", "")
}

pub fn bit_text(v: bool) -> &'static str {
    if v {
        "1"
    } else {
        "0"
    }
}
