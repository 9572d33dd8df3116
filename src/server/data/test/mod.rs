mod comment;
mod user_reaction;
