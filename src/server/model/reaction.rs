//! User reactions (like, dislike, bookmark) on posts and comments.

use chrono::{DateTime, Utc};

use crate::model::post::ReactionStateDto;

/// Kind of content a reaction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetType {
    Post,
    Comment,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }
}

/// A reaction target: content kind plus id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionTarget {
    pub target_type: TargetType,
    pub target_id: i32,
}

impl ReactionTarget {
    pub fn post(id: i32) -> Self {
        Self {
            target_type: TargetType::Post,
            target_id: id,
        }
    }

    pub fn comment(id: i32) -> Self {
        Self {
            target_type: TargetType::Comment,
            target_id: id,
        }
    }
}

/// Reaction requested by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionKind {
    Like,
    Dislike,
    Bookmark,
}

impl ReactionKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "like" => Some(Self::Like),
            "dislike" => Some(Self::Dislike),
            "bookmark" => Some(Self::Bookmark),
            _ => None,
        }
    }
}

/// Single boolean column on a reaction row, used for activity queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionFlag {
    Liked,
    Disliked,
    Bookmarked,
}

impl ReactionFlag {
    pub fn column(&self) -> entity::user_reaction::Column {
        match self {
            Self::Liked => entity::user_reaction::Column::Liked,
            Self::Disliked => entity::user_reaction::Column::Disliked,
            Self::Bookmarked => entity::user_reaction::Column::Bookmarked,
        }
    }
}

/// Per-user reaction state on one target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReactionFlags {
    pub liked: bool,
    pub disliked: bool,
    pub bookmarked: bool,
}

/// Counter adjustments resulting from a reaction toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterDelta {
    pub like: i64,
    pub dislike: i64,
    pub bookmark: i64,
}

impl ReactionFlags {
    /// Toggles `kind` and returns the new flags with the counter changes they imply.
    ///
    /// Liking clears an existing dislike and vice versa, moving one count between the
    /// two counters. Bookmarks are independent.
    pub fn toggle(self, kind: ReactionKind) -> (Self, CounterDelta) {
        let mut next = self;
        let mut delta = CounterDelta::default();

        match kind {
            ReactionKind::Like => {
                next.liked = !self.liked;
                delta.like = if next.liked { 1 } else { -1 };
                if next.liked && self.disliked {
                    next.disliked = false;
                    delta.dislike = -1;
                }
            }
            ReactionKind::Dislike => {
                next.disliked = !self.disliked;
                delta.dislike = if next.disliked { 1 } else { -1 };
                if next.disliked && self.liked {
                    next.liked = false;
                    delta.like = -1;
                }
            }
            ReactionKind::Bookmark => {
                next.bookmarked = !self.bookmarked;
                delta.bookmark = if next.bookmarked { 1 } else { -1 };
            }
        }

        (next, delta)
    }
}

/// Stored reaction row.
#[derive(Debug, Clone, PartialEq)]
pub struct UserReaction {
    pub id: i32,
    pub user_id: i32,
    pub target_id: i32,
    pub flags: ReactionFlags,
    pub updated_at: DateTime<Utc>,
}

impl UserReaction {
    pub fn from_entity(entity: entity::user_reaction::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            target_id: entity.target_id,
            flags: ReactionFlags {
                liked: entity.liked,
                disliked: entity.disliked,
                bookmarked: entity.bookmarked,
            },
            updated_at: entity.updated_at,
        }
    }
}

/// A user's flags on a target together with the target's current counters.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionState {
    pub target: ReactionTarget,
    pub flags: ReactionFlags,
    pub like_count: i64,
    pub dislike_count: i64,
    pub bookmark_count: i64,
}

impl ReactionState {
    pub fn into_dto(self) -> ReactionStateDto {
        ReactionStateDto {
            target_type: self.target.target_type.as_str().to_string(),
            target_id: self.target.target_id,
            liked: self.flags.liked,
            disliked: self.flags.disliked,
            bookmarked: self.flags.bookmarked,
            like_count: self.like_count,
            dislike_count: self.dislike_count,
            bookmark_count: self.bookmark_count,
        }
    }
}
