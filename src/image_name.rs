/// Names page images: `prefix_NN.ext`, where `NN` is the page index padded
/// with zeros to the number of digits in the page count. The `_` is left out
/// when the prefix is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageNameFormatter {
    prefix: String,
    num_digits: usize,
    extension: String,
}

impl ImageNameFormatter {
    /// `extension` includes the leading dot
    pub fn new(prefix: &str, image_count: usize, extension: &str) -> Self {
        let prefix = if prefix.is_empty() {
            String::new()
        } else {
            format!("{}_", prefix)
        };

        Self {
            prefix,
            num_digits: count_digits(image_count),
            extension: extension.to_owned(),
        }
    }

    pub fn format(&self, image_idx: usize) -> String {
        format!(
            "{}{:0width$}{}",
            self.prefix,
            image_idx,
            self.extension,
            width = self.num_digits
        )
    }
}

fn count_digits(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }

    digits
}
