pub mod header;
pub mod controls;
pub mod ban_list;
pub mod cat_card;
