use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(LessonId);
id_newtype!(SlideId);
id_newtype!(ReactionId);

/// Which ordered collection of the admin pages an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Lessons,
    /// Slides of a single lesson.
    Slides { lesson_id: LessonId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideType {
    Text,
    Image,
    SmallSticker,
    BigSticker,
    PinDict,
    QuizOptions,
    QuizInputWord,
    QuizInputPhrase,
    FinalSlide,
}

impl SlideType {
    pub const ALL: [SlideType; 9] = [
        SlideType::Text,
        SlideType::Image,
        SlideType::SmallSticker,
        SlideType::BigSticker,
        SlideType::PinDict,
        SlideType::QuizOptions,
        SlideType::QuizInputWord,
        SlideType::QuizInputPhrase,
        SlideType::FinalSlide,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SlideType::Text => "text",
            SlideType::Image => "image",
            SlideType::SmallSticker => "small_sticker",
            SlideType::BigSticker => "big_sticker",
            SlideType::PinDict => "pin_dict",
            SlideType::QuizOptions => "quiz_options",
            SlideType::QuizInputWord => "quiz_input_word",
            SlideType::QuizInputPhrase => "quiz_input_phrase",
            SlideType::FinalSlide => "final_slide",
        }
    }
}

impl fmt::Display for SlideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown slide type '{0}'")]
pub struct UnknownSlideType(pub String);

impl FromStr for SlideType {
    type Err = UnknownSlideType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlideType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSlideType(s.to_string()))
    }
}

/// Reactions are edited as two lists on the reactions page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    Correct,
    Incorrect,
}

impl ReactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReactionKind::Correct => "correct",
            ReactionKind::Incorrect => "incorrect",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
