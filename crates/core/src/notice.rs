use std::fmt;

/// Messages shown to the operator. None of them are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    RecognitionFailed,
    /// Shown under the recipient or deputy field when it is empty.
    NameWithCodeRequired,
    Copied,
    CopyManually,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::RecognitionFailed => "تعذر استخراج النص من الصورة",
            Notice::NameWithCodeRequired => "يجب عليك كتابة الاسم مع كود",
            Notice::Copied => "تم النسخ ✅",
            Notice::CopyManually => "انسخ يدويًا",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
