//! SeaORM Entity for polls_choice table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "polls_choice")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub question_id: i32,
    pub choice_text: String,
    pub votes: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::polls_question::Entity",
        from = "Column::QuestionId",
        to = "super::polls_question::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    PollsQuestion,
}

impl Related<super::polls_question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PollsQuestion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
