use crate::dto::UserDto;
use crate::models::User;

/// UserDto → User
pub fn to_user(dto: UserDto) -> User {
    User {
        id: dto.id,
        nombre: dto.nombre,
        email: dto.email,
        role: dto.role,
        telefono: dto.telefono,
        ubicacion: dto.ubicacion,
        direccion: dto.direccion,
    }
}

pub fn to_user_list(dtos: Vec<UserDto>) -> Vec<User> {
    dtos.into_iter().map(to_user).collect()
}
