diesel::table! {
    users (id) {
        id -> Integer,
        username -> Text,
        password_hash -> Text,
        date_joined -> Timestamp,
    }
}

diesel::table! {
    board_posts (id) {
        id -> Integer,
        text -> Text,
    }
}

diesel::table! {
    blog_posts (id) {
        id -> Integer,
        title -> Text,
        body -> Text,
        author_id -> Integer,
        created_at -> Timestamp,
    }
}

diesel::table! {
    articles (id) {
        id -> Integer,
        title -> Text,
        body -> Text,
        date -> Timestamp,
        author_id -> Integer,
    }
}

diesel::joinable!(blog_posts -> users (author_id));
diesel::joinable!(articles -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(articles, blog_posts, board_posts, users);
