use serde::{Deserialize, Serialize};

use super::{MemberId, MemberRevised, commands::AddMember};

/// 会員エンティティ
///
/// 貸出中の書籍一覧は保持しない。貸出中の取引から導出する
/// （`Catalog::borrowed_books`）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// 純粋関数：登録コマンドから新しい会員を作る
pub fn register_member(id: MemberId, cmd: AddMember) -> Member {
    Member {
        id,
        name: cmd.name,
        email: cmd.email,
        phone: cmd.phone,
    }
}

/// 純粋関数：会員情報を更新する
///
/// `name`, `email`, `phone`を上書きし、IDは現在の値を維持する。
pub fn revise_member(current: &Member, revision: &Member) -> (Member, MemberRevised) {
    let member = Member {
        id: current.id,
        name: revision.name.clone(),
        email: revision.email.clone(),
        phone: revision.phone.clone(),
    };

    let event = MemberRevised {
        member_id: member.id,
        name: member.name.clone(),
        email: member.email.clone(),
        phone: member.phone.clone(),
    };

    (member, event)
}
